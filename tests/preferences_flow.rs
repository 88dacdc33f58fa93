//! Integration tests for the topic-preference flow.
//!
//! These drive the `PreferenceEditor` the way the settings page does: gate
//! on the session, load the selection, toggle checkboxes, save, and render
//! the transient feedback banner.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use daybrief::adapters::catalog::FixedTopicCatalog;
use daybrief::adapters::identity::MockIdentityProvider;
use daybrief::adapters::store::InMemoryProfileStore;
use daybrief::application::{PreferenceEditor, SaveFeedback, SessionManager, FEEDBACK_DISPLAY};
use daybrief::domain::foundation::{Timestamp, TopicId, UserId};
use daybrief::domain::preferences::{TopicSelection, UserProfile};
use daybrief::domain::session::Session;
use daybrief::ports::{IdentityProvider, ProfileStore, StoreError};

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "hunter22";

fn tid(s: &str) -> TopicId {
    TopicId::new(s).unwrap()
}

fn uid() -> UserId {
    UserId::new("uid-alice").unwrap()
}

fn editor_over(profiles: Arc<InMemoryProfileStore>) -> PreferenceEditor {
    PreferenceEditor::new(Arc::new(FixedTopicCatalog::builtin()), profiles)
}

async fn seed_profile(profiles: &InMemoryProfileStore, topics: BTreeSet<TopicId>) {
    profiles
        .create(
            &uid(),
            &UserProfile::new(EMAIL, Timestamp::now()).with_topics(topics),
        )
        .await
        .unwrap();
}

/// What the settings page does on mount: nothing at all without a user.
async fn settings_view(
    session: &Session,
    editor: &PreferenceEditor,
) -> Option<TopicSelection> {
    let user = session.user()?;
    editor.load(&user.id).await.ok()
}

// =============================================================================
// Gating on the session
// =============================================================================

#[tokio::test]
async fn anonymous_session_loads_nothing() {
    let profiles = Arc::new(InMemoryProfileStore::new());
    let editor = editor_over(Arc::clone(&profiles));
    let manager = SessionManager::new(
        Arc::new(MockIdentityProvider::new()),
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
    );

    let rendered = settings_view(&manager.session(), &editor).await;

    assert!(rendered.is_none());
    assert_eq!(profiles.find_calls(), 0);
}

#[tokio::test]
async fn authenticated_session_loads_the_toggle_grid() {
    let identity = Arc::new(MockIdentityProvider::new().with_account(EMAIL, PASSWORD));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let editor = editor_over(Arc::clone(&profiles));
    let manager = SessionManager::new(
        Arc::clone(&identity) as Arc<dyn IdentityProvider>,
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
    );
    let mut rx = manager.watch();
    manager.start();
    assert!(manager.login(EMAIL, PASSWORD).await);
    tokio::time::timeout(Duration::from_secs(1), async {
        while !rx.borrow().is_authenticated() {
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("login never reflected in the session");

    let rendered = settings_view(&manager.session(), &editor).await;

    let selection = rendered.expect("toggle grid should render");
    assert!(!selection.catalog().is_empty());
    assert!(selection.selected().is_empty());
}

// =============================================================================
// Toggle and save
// =============================================================================

#[tokio::test]
async fn toggling_on_and_off_saves_the_original_set() {
    let profiles = Arc::new(InMemoryProfileStore::new());
    let before: BTreeSet<_> = [tid("business")].into_iter().collect();
    seed_profile(&profiles, before.clone()).await;
    let editor = editor_over(Arc::clone(&profiles));

    let mut selection = editor.load(&uid()).await.unwrap();
    selection.toggle(&tid("science"));
    selection.toggle(&tid("science"));
    assert!(editor.save(&uid(), &selection).await);

    let profile = profiles.find(&uid()).await.unwrap().unwrap();
    assert_eq!(profile.topics, before);
}

#[tokio::test]
async fn later_save_overwrites_earlier_save_entirely() {
    let profiles = Arc::new(InMemoryProfileStore::new());
    seed_profile(&profiles, BTreeSet::new()).await;

    // Two settings pages, same account: each holds its own working copy.
    let first_editor = editor_over(Arc::clone(&profiles));
    let second_editor = editor_over(Arc::clone(&profiles));

    let mut first = first_editor.load(&uid()).await.unwrap();
    first.toggle(&tid("ai"));
    first.toggle(&tid("business"));
    let mut second = second_editor.load(&uid()).await.unwrap();
    second.toggle(&tid("climate"));

    assert!(first_editor.save(&uid(), &first).await);
    assert!(second_editor.save(&uid(), &second).await);

    // Last write wins: {climate}, never a merge of the two edits.
    let profile = profiles.find(&uid()).await.unwrap().unwrap();
    let expected: BTreeSet<_> = [tid("climate")].into_iter().collect();
    assert_eq!(profile.topics, expected);
}

#[tokio::test]
async fn selection_survives_a_missing_topics_field() {
    let profiles = Arc::new(InMemoryProfileStore::new());
    seed_profile(&profiles, BTreeSet::new()).await;
    let editor = editor_over(Arc::clone(&profiles));

    let selection = editor.load(&uid()).await.unwrap();

    assert!(selection.selected().is_empty());
    assert!(!selection.catalog().is_empty());
}

// =============================================================================
// Feedback banner
// =============================================================================

#[tokio::test(start_paused = true)]
async fn save_shows_then_clears_the_confirmation() {
    let profiles = Arc::new(InMemoryProfileStore::new());
    seed_profile(&profiles, BTreeSet::new()).await;
    let editor = editor_over(profiles);
    let feedback = editor.feedback();

    let selection = editor.load(&uid()).await.unwrap();
    assert!(editor.save(&uid(), &selection).await);

    assert_eq!(*feedback.borrow(), Some(SaveFeedback::Saved));
    assert_eq!(feedback.borrow().unwrap().message(), "Preferences saved!");

    tokio::time::sleep(FEEDBACK_DISPLAY + Duration::from_millis(50)).await;

    assert_eq!(*feedback.borrow(), None);
}

#[tokio::test]
async fn failed_save_shows_the_failure_copy() {
    let profiles =
        Arc::new(InMemoryProfileStore::new().with_error(StoreError::network("offline")));
    let editor = editor_over(profiles);
    let selection = TopicSelection::new(Vec::new(), BTreeSet::new());

    assert!(!editor.save(&uid(), &selection).await);

    let feedback = editor.feedback();
    assert_eq!(*feedback.borrow(), Some(SaveFeedback::Failed));
    assert_eq!(
        feedback.borrow().unwrap().message(),
        "Failed to save preferences."
    );
}
