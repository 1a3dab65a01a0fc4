mod common;

use std::{sync::atomic::Ordering, time::Duration};

use common::*;
use rusty_paginator::{
    CleanupAction, DispatchOutcome, DropReason, PaginationError, PaginationOptions, ReactionEvent,
};
use twilight_model::id::Id;

#[tokio::test]
async fn sending_renders_page_one_and_seeds_controls_in_order() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 5, PaginationOptions::default()).await;

    let calls = transport.calls();
    assert_eq!(
        calls[0],
        Call::Send {
            channel_id: CHANNEL.get(),
            footer: "Page 1/5".to_owned(),
        }
    );
    let seeded: Vec<&str> = calls[1..]
        .iter()
        .map(|call| match call {
            Call::AddReaction { button, .. } => button.as_str(),
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(seeded, [FIRST, PREVIOUS, NEXT, LAST, STOP]);

    let view = paginator.sessions().get(handle.message_id).await.unwrap();
    assert_eq!(view.cursor, 1);
    assert_eq!(view.total_pages, 5);
}

#[tokio::test]
async fn next_on_first_page_moves_to_page_two() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 5, PaginationOptions::default()).await;

    let outcome = paginator.handle_reaction(press(handle, NEXT, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Navigated { page: 2 });
    assert_eq!(transport.edits(), ["Page 2/5"]);
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { user_id, .. } if *user_id == OWNER.get())),
        1
    );
    let view = paginator.sessions().get(handle.message_id).await.unwrap();
    assert_eq!(view.cursor, 2);
}

#[tokio::test]
async fn non_owner_reaction_is_stripped_without_navigation() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 5, PaginationOptions::default().owner(OWNER)).await;

    let outcome = paginator.handle_reaction(press(handle, NEXT, STRANGER)).await;
    settle().await;

    assert_eq!(outcome, DispatchOutcome::Denied);
    assert!(transport.edits().is_empty());
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. })),
        1
    );
    assert_eq!(
        transport.count(|call| matches!(
            call,
            Call::RemoveReaction { button, user_id, .. } if button == NEXT && *user_id == STRANGER.get()
        )),
        1
    );
    let view = paginator.sessions().get(handle.message_id).await.unwrap();
    assert_eq!(view.cursor, 1);
    assert_eq!(view.owner, Some(OWNER));
}

#[tokio::test]
async fn owner_can_still_navigate_an_owned_session() {
    let (paginator, _transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default().owner(OWNER)).await;

    let outcome = paginator.handle_reaction(press(handle, LAST, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Navigated { page: 3 });
}

#[tokio::test]
async fn next_on_a_single_page_does_nothing_but_strip() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 1, PaginationOptions::default()).await;

    let outcome = paginator.handle_reaction(press(handle, NEXT, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Unchanged { page: 1 });
    assert!(transport.edits().is_empty());
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. })),
        1
    );
}

#[tokio::test]
async fn walking_the_pages_respects_the_boundaries() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    let presses = [
        (PREVIOUS, DispatchOutcome::Unchanged { page: 1 }),
        (LAST, DispatchOutcome::Navigated { page: 3 }),
        (NEXT, DispatchOutcome::Unchanged { page: 3 }),
        (LAST, DispatchOutcome::Unchanged { page: 3 }),
        (PREVIOUS, DispatchOutcome::Navigated { page: 2 }),
        (FIRST, DispatchOutcome::Navigated { page: 1 }),
        (FIRST, DispatchOutcome::Unchanged { page: 1 }),
    ];

    for (button, expected) in presses {
        assert_eq!(
            paginator.handle_reaction(press(handle, button, OWNER)).await,
            expected,
            "pressing {button}"
        );
    }

    assert_eq!(transport.edits(), ["Page 3/3", "Page 2/3", "Page 1/3"]);
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. })),
        presses.len()
    );
}

#[tokio::test]
async fn stop_deletes_once_and_repeated_stop_is_a_no_op() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 5, PaginationOptions::default()).await;

    let first = paginator.handle_reaction(press(handle, STOP, OWNER)).await;
    let second = paginator.handle_reaction(press(handle, STOP, OWNER)).await;

    assert_eq!(first, DispatchOutcome::Stopped);
    assert_eq!(second, DispatchOutcome::Dropped(DropReason::NotPaginated));
    assert_eq!(transport.count(|call| matches!(call, Call::Delete { .. })), 1);
    assert!(paginator.sessions().is_empty().await);
}

#[tokio::test]
async fn stop_can_keep_the_message_and_clear_reactions() {
    let (paginator, transport) = paginator();
    let options = PaginationOptions::default().stop_action(CleanupAction::ClearReactions);
    let handle = send(&paginator, 2, options).await;

    let outcome = paginator.handle_reaction(press(handle, STOP, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Stopped);
    assert_eq!(transport.count(|call| matches!(call, Call::Delete { .. })), 0);
    assert_eq!(
        transport.count(|call| matches!(call, Call::ClearReactions { .. })),
        1
    );
}

#[tokio::test]
async fn stop_listening_leaves_the_message_alone() {
    let (paginator, transport) = paginator();
    let options = PaginationOptions::default().stop_action(CleanupAction::StopListening);
    let handle = send(&paginator, 2, options).await;

    assert_eq!(
        paginator.handle_reaction(press(handle, STOP, OWNER)).await,
        DispatchOutcome::Stopped
    );
    assert_eq!(
        transport.count(|call| matches!(call, Call::Delete { .. } | Call::ClearReactions { .. })),
        0
    );
    assert!(!paginator.sessions().contains(handle.message_id).await);
}

#[tokio::test]
async fn failed_delete_on_stop_is_swallowed() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 2, PaginationOptions::default()).await;
    transport.fail_deletes.store(true, Ordering::SeqCst);

    assert_eq!(
        paginator.handle_reaction(press(handle, STOP, OWNER)).await,
        DispatchOutcome::Stopped
    );
    assert!(paginator.sessions().is_empty().await);
}

#[tokio::test]
async fn failed_edit_still_commits_the_cursor() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 4, PaginationOptions::default()).await;
    transport.fail_edits.store(true, Ordering::SeqCst);

    let outcome = paginator.handle_reaction(press(handle, NEXT, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Navigated { page: 2 });
    let view = paginator.sessions().get(handle.message_id).await.unwrap();
    assert_eq!(view.cursor, 2);
}

#[tokio::test]
async fn bots_own_reactions_are_ignored() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    let outcome = paginator.handle_reaction(press(handle, NEXT, BOT)).await;

    assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::OwnReaction));
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. } | Call::Edit { .. })),
        0
    );
}

#[tokio::test]
async fn unresolved_events_are_dropped() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    let no_message = ReactionEvent {
        message: None,
        ..press(handle, NEXT, OWNER)
    };
    let no_user = ReactionEvent {
        user_id: None,
        ..press(handle, NEXT, OWNER)
    };

    assert_eq!(
        paginator.handle_reaction(no_message).await,
        DispatchOutcome::Dropped(DropReason::UnresolvedMessage)
    );
    assert_eq!(
        paginator.handle_reaction(no_user).await,
        DispatchOutcome::Dropped(DropReason::UnknownUser)
    );
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. })),
        0
    );
}

#[tokio::test]
async fn reactions_on_other_messages_are_dropped() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;
    let elsewhere = rusty_paginator::MessageHandle::new(handle.channel_id, Id::new(4242));

    let outcome = paginator.handle_reaction(press(elsewhere, NEXT, OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::NotPaginated));
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { .. })),
        0
    );
}

#[tokio::test]
async fn unknown_buttons_are_stripped_without_rendering() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    let outcome = paginator.handle_reaction(press(handle, "👍", OWNER)).await;

    assert_eq!(outcome, DispatchOutcome::Unchanged { page: 1 });
    assert!(transport.edits().is_empty());
    assert_eq!(
        transport.count(|call| matches!(call, Call::RemoveReaction { button, .. } if button == "👍")),
        1
    );
}

#[tokio::test]
async fn sessions_on_different_messages_are_independent() {
    let (paginator, transport) = paginator();
    let first = send(&paginator, 3, PaginationOptions::default()).await;
    let second = send(&paginator, 3, PaginationOptions::default()).await;
    assert_ne!(first.message_id, second.message_id);

    let (a, b) = tokio::join!(
        paginator.handle_reaction(press(first, LAST, OWNER)),
        paginator.handle_reaction(press(second, STOP, OWNER)),
    );

    assert_eq!(a, DispatchOutcome::Navigated { page: 3 });
    assert_eq!(b, DispatchOutcome::Stopped);
    assert_eq!(paginator.sessions().len().await, 1);
    assert_eq!(
        transport.count(|call| matches!(call, Call::Delete { message_id } if *message_id == second.message_id.get())),
        1
    );
}

#[tokio::test]
async fn send_failure_propagates_and_registers_nothing() {
    let (paginator, transport) = paginator();
    transport.fail_sends.store(true, Ordering::SeqCst);

    let result = paginator
        .send_paginated(CHANNEL, pages(2), PaginationOptions::default())
        .await;

    assert!(result.is_err());
    assert!(paginator.sessions().is_empty().await);
}

#[tokio::test]
async fn seeding_failure_propagates_and_unregisters() {
    let (paginator, transport) = paginator();
    transport.fail_reactions.store(true, Ordering::SeqCst);

    let result = paginator
        .send_paginated(CHANNEL, pages(2), PaginationOptions::default())
        .await;

    let error = result.expect_err("seeding must fail");
    assert!(format!("{error:#}").contains("add reactions"));
    assert!(paginator.sessions().is_empty().await);
}

#[tokio::test]
async fn empty_page_list_is_rejected_before_sending() {
    let result = rusty_paginator::PageStore::new("Title", None, Vec::<String>::new());

    assert!(matches!(result, Err(PaginationError::NoPages)));
}

#[tokio::test]
async fn deleted_message_forgets_its_session_silently() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;
    let calls_before = transport.calls().len();

    assert!(paginator.handle_message_deleted(handle.message_id).await);
    assert!(!paginator.handle_message_deleted(handle.message_id).await);

    assert_eq!(transport.calls().len(), calls_before);
    assert_eq!(
        paginator.handle_reaction(press(handle, NEXT, OWNER)).await,
        DispatchOutcome::Dropped(DropReason::NotPaginated)
    );
}

#[tokio::test]
async fn programmatic_stop_uses_the_stop_action() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    assert!(paginator.stop(handle.message_id).await);
    assert!(!paginator.stop(handle.message_id).await);
    assert_eq!(transport.count(|call| matches!(call, Call::Delete { .. })), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_presses_leave_the_message_on_the_committed_page() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 5, PaginationOptions::default()).await;
    transport.delay_edit("Page 2/5", Duration::from_millis(50));

    let next = tokio::spawn({
        let paginator = paginator.clone();
        async move { paginator.handle_reaction(press(handle, NEXT, OWNER)).await }
    });
    let last = tokio::spawn({
        let paginator = paginator.clone();
        async move { paginator.handle_reaction(press(handle, LAST, OWNER)).await }
    });

    assert_eq!(next.await.unwrap(), DispatchOutcome::Navigated { page: 2 });
    assert_eq!(last.await.unwrap(), DispatchOutcome::Navigated { page: 5 });

    let view = paginator.sessions().get(handle.message_id).await.unwrap();
    assert_eq!(view.cursor, 5);
    assert_eq!(transport.shown_footer().as_deref(), Some("Page 5/5"));
}

#[tokio::test]
async fn pressing_back_to_the_shown_page_still_renders() {
    let (paginator, transport) = paginator();
    let handle = send(&paginator, 3, PaginationOptions::default()).await;

    paginator.handle_reaction(press(handle, NEXT, OWNER)).await;
    paginator.handle_reaction(press(handle, PREVIOUS, OWNER)).await;

    assert_eq!(transport.edits(), ["Page 2/3", "Page 1/3"]);
}
