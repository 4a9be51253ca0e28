//! Console state machine flow tests
//!
//! Drives the pure transition function through full operator journeys,
//! with the session store in the loop but no transport anywhere.

use assert_matches::assert_matches;
use ChatWarden::state::{
    machine::{parse_callback, transition, ConsoleEvent, Effect, MenuAction},
    AdminSession, ConsoleState, InMemorySessionStore, Menu, SessionStore,
};

fn feed(session: &mut AdminSession, event: ConsoleEvent) -> Vec<Effect> {
    let result = transition(session.state, &mut session.scratch, event);
    if let Some(next) = result.state {
        session.state = next;
    }
    result.effects
}

#[test]
fn test_full_ban_journey() {
    let mut session = AdminSession::new(42, -100);

    // Root -> Users -> ban wizard -> valid id -> back in Users
    feed(&mut session, ConsoleEvent::Navigate(Menu::Users));
    assert_eq!(session.state, ConsoleState::Menu(Menu::Users));

    feed(&mut session, ConsoleEvent::Select(MenuAction::BanStart));
    assert_eq!(session.state, ConsoleState::AwaitingBanTarget);

    let effects = feed(&mut session, ConsoleEvent::Input("oops".to_string()));
    assert_eq!(session.state, ConsoleState::AwaitingBanTarget);
    assert!(!effects.iter().any(|e| matches!(e, Effect::BanUser(_))));
    assert_matches!(effects.first(), Some(Effect::Notice(_)));

    let effects = feed(&mut session, ConsoleEvent::Input("777".to_string()));
    assert_eq!(session.state, ConsoleState::Menu(Menu::Users));
    assert!(effects.contains(&Effect::BanUser(777)));
}

#[test]
fn test_full_poll_journey_with_retry() {
    let mut session = AdminSession::new(42, -100);

    feed(&mut session, ConsoleEvent::Navigate(Menu::Engagement));
    feed(&mut session, ConsoleEvent::Select(MenuAction::PollStart));
    assert_eq!(session.state, ConsoleState::AwaitingPollQuestion);

    feed(&mut session, ConsoleEvent::Input("Where next?".to_string()));
    assert_eq!(session.state, ConsoleState::AwaitingPollOptions);

    // One option is rejected and the step repeats
    feed(&mut session, ConsoleEvent::Input("only one".to_string()));
    assert_eq!(session.state, ConsoleState::AwaitingPollOptions);

    let effects = feed(&mut session, ConsoleEvent::Input("Park, Hall, Beach".to_string()));
    assert_eq!(session.state, ConsoleState::Menu(Menu::Engagement));
    assert!(effects.contains(&Effect::SendPoll {
        question: "Where next?".to_string(),
        options: vec!["Park".to_string(), "Hall".to_string(), "Beach".to_string()],
    }));
    assert!(session.scratch.is_empty());
}

#[test]
fn test_cancel_mid_schedule_clears_everything() {
    let mut session = AdminSession::new(42, -100);

    feed(&mut session, ConsoleEvent::Select(MenuAction::ScheduleStart));
    feed(&mut session, ConsoleEvent::Input("30".to_string()));
    assert_eq!(session.state, ConsoleState::AwaitingScheduleText);
    assert!(!session.scratch.is_empty());

    feed(&mut session, ConsoleEvent::Cancel);
    assert_eq!(session.state, ConsoleState::Menu(Menu::Root));
    assert!(session.scratch.is_empty());
}

#[test]
fn test_session_store_journey() {
    let store = InMemorySessionStore::shared();

    store.save(AdminSession::new(42, -100));
    let mut session = store.load(42).unwrap();

    feed(&mut session, ConsoleEvent::Select(MenuAction::WelcomeStart));
    store.save(session);

    let reloaded = store.load(42).unwrap();
    assert_eq!(reloaded.state, ConsoleState::AwaitingWelcomeText);
    assert!(reloaded.state.awaits_input());

    assert!(store.remove(42));
    assert!(store.load(42).is_none());
}

#[test]
fn test_callback_payloads_cover_full_menu_tree() {
    // Every button the console can render must map onto a machine event
    for menu in [Menu::Root, Menu::Users, Menu::Engagement, Menu::Config, Menu::Security] {
        for (_, payload) in menu.entries() {
            let event = parse_callback(payload).expect("payload must parse");
            let mut session = AdminSession::new(1, 1);
            let result = transition(session.state, &mut session.scratch, event);
            // Every event leaves the machine in a defined state or closes it
            if let Some(state) = result.state {
                session.state = state;
            }
        }
    }
}
