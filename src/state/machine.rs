//! Console state machine
//!
//! The pure transition function for the admin console. Given the current
//! state, the wizard scratch data, and one operator event, it yields the
//! next state plus a list of effects for the executor to carry out. No
//! transport, persistence, or clock access happens here, so every
//! transition is testable in isolation.
//!
//! Invariants:
//! - cancel from any awaiting-input state lands in the root menu with
//!   scratch cleared;
//! - input that fails validation re-prompts and stays in place;
//! - every event leaves the machine in a defined state.

use super::session::{ConsoleState, Menu, Scratch};
use crate::utils::helpers::parse_user_id;

/// One operator-issued console event
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    /// Menu-selection click resolving to a different menu
    Navigate(Menu),
    /// Menu-selection click starting a wizard or immediate action
    Select(MenuAction),
    /// Free-text operator input for the current wizard step
    Input(String),
    /// Universal cancel; discards scratch data
    Cancel,
    /// Close the console entirely
    Close,
}

/// Leaf actions selectable from the menus
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    BanStart,
    UnbanStart,
    ViewStart,
    PromoteStart,
    ExportCsv,
    PollStart,
    TopicStart,
    WelcomeStart,
    ScheduleStart,
    BroadcastStart,
    LockdownToggle,
    FilterStart,
    SetReformatStyle(String),
}

/// Operator-facing prompt for a wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    BanTarget,
    UnbanTarget,
    ViewTarget,
    PromoteTarget,
    PollQuestion,
    PollOptions,
    BroadcastText,
    ScheduleDelay,
    ScheduleText,
    TopicName,
    WelcomeText,
    FilterWord,
}

impl Prompt {
    pub fn text(&self) -> &'static str {
        match self {
            Prompt::BanTarget => "🔨 Ban User\nSend the user id:",
            Prompt::UnbanTarget => "🏳️ Unban User\nSend the user id:",
            Prompt::ViewTarget => "🔍 View User\nSend the user id:",
            Prompt::PromoteTarget => "👮 Promote\nSend the user id to promote:",
            Prompt::PollQuestion => "📊 New Poll\nSend the question:",
            Prompt::PollOptions => "📝 Options\nSend comma-separated options (at least two):",
            Prompt::BroadcastText => "📢 Broadcast\nSend the message to deliver to ALL users:",
            Prompt::ScheduleDelay => "⏳ Schedule\nSend the delay in minutes:",
            Prompt::ScheduleText => "📝 Message Text\nSend the message content:",
            Prompt::TopicName => "📂 New Topic\nSend the topic name:",
            Prompt::WelcomeText => "👋 Edit Welcome\nSend the new welcome text:",
            Prompt::FilterWord => "🤬 Bad Words\nSend a word to add or remove:",
        }
    }
}

/// Side effect requested by a transition; executed outside the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RenderMenu(Menu),
    Prompt(Prompt),
    /// Short operator-facing notice (validation failures, confirmations)
    Notice(String),
    BanUser(i64),
    UnbanUser(i64),
    ViewUser(i64),
    PromoteUser(i64),
    SendPoll { question: String, options: Vec<String> },
    ScheduleMessage { delay_minutes: u64, text: String },
    CreateTopic(String),
    SetWelcome(String),
    ToggleFilterWord(String),
    Broadcast(String),
    ToggleLockdown,
    SetReformatStyle(String),
    ExportUsers,
    CloseConsole,
}

/// Result of one transition: the next state (None means the session is
/// closed) and the effects to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Option<ConsoleState>,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: ConsoleState, effects: Vec<Effect>) -> Self {
        Self { state: Some(state), effects }
    }

    fn closed(effects: Vec<Effect>) -> Self {
        Self { state: None, effects }
    }
}

/// Parse a console callback payload into an event
pub fn parse_callback(data: &str) -> Option<ConsoleEvent> {
    match data {
        "menu:root" => Some(ConsoleEvent::Navigate(Menu::Root)),
        "menu:users" => Some(ConsoleEvent::Navigate(Menu::Users)),
        "menu:engagement" => Some(ConsoleEvent::Navigate(Menu::Engagement)),
        "menu:config" => Some(ConsoleEvent::Navigate(Menu::Config)),
        "menu:security" => Some(ConsoleEvent::Navigate(Menu::Security)),
        "action:ban" => Some(ConsoleEvent::Select(MenuAction::BanStart)),
        "action:unban" => Some(ConsoleEvent::Select(MenuAction::UnbanStart)),
        "action:view" => Some(ConsoleEvent::Select(MenuAction::ViewStart)),
        "action:promote" => Some(ConsoleEvent::Select(MenuAction::PromoteStart)),
        "action:export" => Some(ConsoleEvent::Select(MenuAction::ExportCsv)),
        "action:poll" => Some(ConsoleEvent::Select(MenuAction::PollStart)),
        "action:topic" => Some(ConsoleEvent::Select(MenuAction::TopicStart)),
        "action:welcome" => Some(ConsoleEvent::Select(MenuAction::WelcomeStart)),
        "action:schedule" => Some(ConsoleEvent::Select(MenuAction::ScheduleStart)),
        "action:broadcast" => Some(ConsoleEvent::Select(MenuAction::BroadcastStart)),
        "action:lockdown" => Some(ConsoleEvent::Select(MenuAction::LockdownToggle)),
        "action:filter" => Some(ConsoleEvent::Select(MenuAction::FilterStart)),
        "admin:cancel" => Some(ConsoleEvent::Cancel),
        "admin:close" => Some(ConsoleEvent::Close),
        _ => data
            .strip_prefix("reformat:")
            .map(|style| ConsoleEvent::Select(MenuAction::SetReformatStyle(style.to_string()))),
    }
}

mod scratch_keys {
    pub const POLL_QUESTION: &str = "poll_question";
    pub const SCHEDULE_DELAY: &str = "schedule_delay";
}

/// Apply one event to the console state.
pub fn transition(state: ConsoleState, scratch: &mut Scratch, event: ConsoleEvent) -> Transition {
    match event {
        ConsoleEvent::Close => {
            scratch.clear();
            Transition::closed(vec![Effect::CloseConsole])
        }
        ConsoleEvent::Cancel => {
            scratch.clear();
            Transition::stay(
                ConsoleState::Menu(Menu::Root),
                vec![
                    Effect::Notice("Operation cancelled.".to_string()),
                    Effect::RenderMenu(Menu::Root),
                ],
            )
        }
        ConsoleEvent::Navigate(menu) => match state {
            ConsoleState::Menu(_) => {
                Transition::stay(ConsoleState::Menu(menu), vec![Effect::RenderMenu(menu)])
            }
            // Navigation is not a valid answer to a wizard prompt
            awaiting => reprompt(awaiting),
        },
        ConsoleEvent::Select(action) => match state {
            ConsoleState::Menu(_) => select(action, scratch),
            awaiting => reprompt(awaiting),
        },
        ConsoleEvent::Input(text) => input(state, scratch, text),
    }
}

fn select(action: MenuAction, scratch: &mut Scratch) -> Transition {
    // Starting a wizard always begins from clean scratch
    scratch.clear();

    match action {
        MenuAction::BanStart => start(ConsoleState::AwaitingBanTarget, Prompt::BanTarget),
        MenuAction::UnbanStart => start(ConsoleState::AwaitingUnbanTarget, Prompt::UnbanTarget),
        MenuAction::ViewStart => start(ConsoleState::AwaitingViewTarget, Prompt::ViewTarget),
        MenuAction::PromoteStart => start(ConsoleState::AwaitingPromoteTarget, Prompt::PromoteTarget),
        MenuAction::PollStart => start(ConsoleState::AwaitingPollQuestion, Prompt::PollQuestion),
        MenuAction::TopicStart => start(ConsoleState::AwaitingTopicName, Prompt::TopicName),
        MenuAction::WelcomeStart => start(ConsoleState::AwaitingWelcomeText, Prompt::WelcomeText),
        MenuAction::ScheduleStart => start(ConsoleState::AwaitingScheduleDelay, Prompt::ScheduleDelay),
        MenuAction::BroadcastStart => start(ConsoleState::AwaitingBroadcastText, Prompt::BroadcastText),
        MenuAction::FilterStart => start(ConsoleState::AwaitingFilterWord, Prompt::FilterWord),
        MenuAction::ExportCsv => Transition::stay(
            ConsoleState::Menu(Menu::Users),
            vec![Effect::ExportUsers, Effect::RenderMenu(Menu::Users)],
        ),
        MenuAction::LockdownToggle => Transition::stay(
            ConsoleState::Menu(Menu::Security),
            vec![Effect::ToggleLockdown, Effect::RenderMenu(Menu::Security)],
        ),
        MenuAction::SetReformatStyle(style) => Transition::stay(
            ConsoleState::Menu(Menu::Config),
            vec![Effect::SetReformatStyle(style), Effect::RenderMenu(Menu::Config)],
        ),
    }
}

fn start(state: ConsoleState, prompt: Prompt) -> Transition {
    Transition::stay(state, vec![Effect::Prompt(prompt)])
}

fn input(state: ConsoleState, scratch: &mut Scratch, text: String) -> Transition {
    match state {
        ConsoleState::Menu(menu) => Transition::stay(
            ConsoleState::Menu(menu),
            vec![Effect::Notice("Use the menu buttons below.".to_string())],
        ),

        ConsoleState::AwaitingBanTarget => id_step(state, &text, Menu::Users, Effect::BanUser),
        ConsoleState::AwaitingUnbanTarget => id_step(state, &text, Menu::Users, Effect::UnbanUser),
        ConsoleState::AwaitingViewTarget => id_step(state, &text, Menu::Users, Effect::ViewUser),
        ConsoleState::AwaitingPromoteTarget => id_step(state, &text, Menu::Users, Effect::PromoteUser),

        ConsoleState::AwaitingPollQuestion => {
            let question = text.trim();
            if question.is_empty() {
                return invalid(state, "Question cannot be empty.");
            }
            scratch.set(scratch_keys::POLL_QUESTION, question);
            Transition::stay(
                ConsoleState::AwaitingPollOptions,
                vec![Effect::Prompt(Prompt::PollOptions)],
            )
        }

        ConsoleState::AwaitingPollOptions => {
            let options: Vec<String> = text
                .split(',')
                .map(|option| option.trim().to_string())
                .filter(|option| !option.is_empty())
                .collect();
            if options.len() < 2 {
                return invalid(state, "Need at least two options.");
            }
            let question = scratch
                .get_string(scratch_keys::POLL_QUESTION)
                .unwrap_or_default();
            scratch.clear();
            Transition::stay(
                ConsoleState::Menu(Menu::Engagement),
                vec![
                    Effect::SendPoll { question, options },
                    Effect::RenderMenu(Menu::Engagement),
                ],
            )
        }

        ConsoleState::AwaitingScheduleDelay => match text.trim().parse::<u64>() {
            Ok(minutes) if minutes > 0 => {
                scratch.set(scratch_keys::SCHEDULE_DELAY, minutes);
                Transition::stay(
                    ConsoleState::AwaitingScheduleText,
                    vec![Effect::Prompt(Prompt::ScheduleText)],
                )
            }
            _ => invalid(state, "Send a positive number of minutes."),
        },

        ConsoleState::AwaitingScheduleText => {
            let content = text.trim();
            if content.is_empty() {
                return invalid(state, "Message cannot be empty.");
            }
            let delay_minutes = scratch.get_u64(scratch_keys::SCHEDULE_DELAY).unwrap_or(1);
            scratch.clear();
            Transition::stay(
                ConsoleState::Menu(Menu::Engagement),
                vec![
                    Effect::ScheduleMessage { delay_minutes, text: content.to_string() },
                    Effect::RenderMenu(Menu::Engagement),
                ],
            )
        }

        ConsoleState::AwaitingTopicName => text_step(state, &text, Menu::Engagement, |name| {
            Effect::CreateTopic(name)
        }),

        ConsoleState::AwaitingWelcomeText => text_step(state, &text, Menu::Engagement, |welcome| {
            Effect::SetWelcome(welcome)
        }),

        ConsoleState::AwaitingBroadcastText => text_step(state, &text, Menu::Engagement, |message| {
            Effect::Broadcast(message)
        }),

        ConsoleState::AwaitingFilterWord => {
            let word = text.trim().to_lowercase();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return invalid(state, "Send a single word.");
            }
            Transition::stay(
                ConsoleState::Menu(Menu::Security),
                vec![
                    Effect::ToggleFilterWord(word),
                    Effect::RenderMenu(Menu::Security),
                ],
            )
        }
    }
}

fn id_step(
    state: ConsoleState,
    text: &str,
    next_menu: Menu,
    effect: impl Fn(i64) -> Effect,
) -> Transition {
    match parse_user_id(text) {
        Some(user_id) => Transition::stay(
            ConsoleState::Menu(next_menu),
            vec![effect(user_id), Effect::RenderMenu(next_menu)],
        ),
        None => invalid(state, "Invalid user id. Send a numeric id."),
    }
}

fn text_step(
    state: ConsoleState,
    text: &str,
    next_menu: Menu,
    effect: impl Fn(String) -> Effect,
) -> Transition {
    let content = text.trim();
    if content.is_empty() {
        return invalid(state, "Input cannot be empty.");
    }
    Transition::stay(
        ConsoleState::Menu(next_menu),
        vec![effect(content.to_string()), Effect::RenderMenu(next_menu)],
    )
}

fn invalid(state: ConsoleState, message: &str) -> Transition {
    let mut effects = vec![Effect::Notice(format!("❌ {}", message))];
    if let Some(prompt) = prompt_for(state) {
        effects.push(Effect::Prompt(prompt));
    }
    Transition::stay(state, effects)
}

fn reprompt(state: ConsoleState) -> Transition {
    match prompt_for(state) {
        Some(prompt) => Transition::stay(state, vec![Effect::Prompt(prompt)]),
        None => Transition::stay(state, vec![]),
    }
}

fn prompt_for(state: ConsoleState) -> Option<Prompt> {
    match state {
        ConsoleState::Menu(_) => None,
        ConsoleState::AwaitingBanTarget => Some(Prompt::BanTarget),
        ConsoleState::AwaitingUnbanTarget => Some(Prompt::UnbanTarget),
        ConsoleState::AwaitingViewTarget => Some(Prompt::ViewTarget),
        ConsoleState::AwaitingPromoteTarget => Some(Prompt::PromoteTarget),
        ConsoleState::AwaitingPollQuestion => Some(Prompt::PollQuestion),
        ConsoleState::AwaitingPollOptions => Some(Prompt::PollOptions),
        ConsoleState::AwaitingBroadcastText => Some(Prompt::BroadcastText),
        ConsoleState::AwaitingScheduleDelay => Some(Prompt::ScheduleDelay),
        ConsoleState::AwaitingScheduleText => Some(Prompt::ScheduleText),
        ConsoleState::AwaitingTopicName => Some(Prompt::TopicName),
        ConsoleState::AwaitingWelcomeText => Some(Prompt::WelcomeText),
        ConsoleState::AwaitingFilterWord => Some(Prompt::FilterWord),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_awaiting_states() -> Vec<ConsoleState> {
        vec![
            ConsoleState::AwaitingBanTarget,
            ConsoleState::AwaitingUnbanTarget,
            ConsoleState::AwaitingViewTarget,
            ConsoleState::AwaitingPromoteTarget,
            ConsoleState::AwaitingPollQuestion,
            ConsoleState::AwaitingPollOptions,
            ConsoleState::AwaitingBroadcastText,
            ConsoleState::AwaitingScheduleDelay,
            ConsoleState::AwaitingScheduleText,
            ConsoleState::AwaitingTopicName,
            ConsoleState::AwaitingWelcomeText,
            ConsoleState::AwaitingFilterWord,
        ]
    }

    #[test]
    fn test_navigation_between_menus() {
        let mut scratch = Scratch::default();
        let result = transition(
            ConsoleState::Menu(Menu::Root),
            &mut scratch,
            ConsoleEvent::Navigate(Menu::Users),
        );
        assert_eq!(result.state, Some(ConsoleState::Menu(Menu::Users)));
        assert_eq!(result.effects, vec![Effect::RenderMenu(Menu::Users)]);
    }

    #[test]
    fn test_cancel_from_any_awaiting_state_lands_in_root_menu() {
        for state in all_awaiting_states() {
            let mut scratch = Scratch::default();
            scratch.set("poll_question", "left over");

            let result = transition(state, &mut scratch, ConsoleEvent::Cancel);
            assert_eq!(
                result.state,
                Some(ConsoleState::Menu(Menu::Root)),
                "cancel from {:?} must land in root menu",
                state
            );
            assert!(scratch.is_empty(), "cancel from {:?} must clear scratch", state);
        }
    }

    #[test]
    fn test_ban_wizard_happy_path() {
        let mut scratch = Scratch::default();

        let started = transition(
            ConsoleState::Menu(Menu::Users),
            &mut scratch,
            ConsoleEvent::Select(MenuAction::BanStart),
        );
        assert_eq!(started.state, Some(ConsoleState::AwaitingBanTarget));
        assert_eq!(started.effects, vec![Effect::Prompt(Prompt::BanTarget)]);

        let done = transition(
            ConsoleState::AwaitingBanTarget,
            &mut scratch,
            ConsoleEvent::Input("123456".to_string()),
        );
        assert_eq!(done.state, Some(ConsoleState::Menu(Menu::Users)));
        assert!(done.effects.contains(&Effect::BanUser(123456)));
    }

    #[test]
    fn test_invalid_ban_target_reprompts_in_place() {
        let mut scratch = Scratch::default();
        let result = transition(
            ConsoleState::AwaitingBanTarget,
            &mut scratch,
            ConsoleEvent::Input("not-a-number".to_string()),
        );
        assert_eq!(result.state, Some(ConsoleState::AwaitingBanTarget));
        assert!(result.effects.iter().any(|e| matches!(e, Effect::Notice(_))));
        assert!(result.effects.contains(&Effect::Prompt(Prompt::BanTarget)));
        assert!(!result.effects.iter().any(|e| matches!(e, Effect::BanUser(_))));
    }

    #[test]
    fn test_poll_wizard_two_steps() {
        let mut scratch = Scratch::default();

        let after_question = transition(
            ConsoleState::AwaitingPollQuestion,
            &mut scratch,
            ConsoleEvent::Input("Best night?".to_string()),
        );
        assert_eq!(after_question.state, Some(ConsoleState::AwaitingPollOptions));

        let after_options = transition(
            ConsoleState::AwaitingPollOptions,
            &mut scratch,
            ConsoleEvent::Input("A, B".to_string()),
        );
        assert_eq!(after_options.state, Some(ConsoleState::Menu(Menu::Engagement)));
        assert!(after_options.effects.contains(&Effect::SendPoll {
            question: "Best night?".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
        }));
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_single_poll_option_rejected() {
        let mut scratch = Scratch::default();
        scratch.set("poll_question", "Best night?");

        let result = transition(
            ConsoleState::AwaitingPollOptions,
            &mut scratch,
            ConsoleEvent::Input("A".to_string()),
        );
        assert_eq!(result.state, Some(ConsoleState::AwaitingPollOptions));
        assert!(!result.effects.iter().any(|e| matches!(e, Effect::SendPoll { .. })));
        // Question must survive the failed attempt
        assert_eq!(scratch.get_string("poll_question"), Some("Best night?".to_string()));
    }

    #[test]
    fn test_poll_options_trimmed_and_empty_dropped() {
        let mut scratch = Scratch::default();
        scratch.set("poll_question", "Q");

        let result = transition(
            ConsoleState::AwaitingPollOptions,
            &mut scratch,
            ConsoleEvent::Input("  A , B ,, ".to_string()),
        );
        assert!(result.effects.contains(&Effect::SendPoll {
            question: "Q".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
        }));
    }

    #[test]
    fn test_schedule_wizard_two_steps() {
        let mut scratch = Scratch::default();

        let bad_delay = transition(
            ConsoleState::AwaitingScheduleDelay,
            &mut scratch,
            ConsoleEvent::Input("soon".to_string()),
        );
        assert_eq!(bad_delay.state, Some(ConsoleState::AwaitingScheduleDelay));

        let zero_delay = transition(
            ConsoleState::AwaitingScheduleDelay,
            &mut scratch,
            ConsoleEvent::Input("0".to_string()),
        );
        assert_eq!(zero_delay.state, Some(ConsoleState::AwaitingScheduleDelay));

        let good_delay = transition(
            ConsoleState::AwaitingScheduleDelay,
            &mut scratch,
            ConsoleEvent::Input("15".to_string()),
        );
        assert_eq!(good_delay.state, Some(ConsoleState::AwaitingScheduleText));

        let done = transition(
            ConsoleState::AwaitingScheduleText,
            &mut scratch,
            ConsoleEvent::Input("Meeting in the hall".to_string()),
        );
        assert_eq!(done.state, Some(ConsoleState::Menu(Menu::Engagement)));
        assert!(done.effects.contains(&Effect::ScheduleMessage {
            delay_minutes: 15,
            text: "Meeting in the hall".to_string(),
        }));
    }

    #[test]
    fn test_filter_word_lowercased() {
        let mut scratch = Scratch::default();
        let result = transition(
            ConsoleState::AwaitingFilterWord,
            &mut scratch,
            ConsoleEvent::Input("SPAM".to_string()),
        );
        assert!(result.effects.contains(&Effect::ToggleFilterWord("spam".to_string())));
    }

    #[test]
    fn test_immediate_actions_stay_in_menu() {
        let mut scratch = Scratch::default();

        let lockdown = transition(
            ConsoleState::Menu(Menu::Security),
            &mut scratch,
            ConsoleEvent::Select(MenuAction::LockdownToggle),
        );
        assert_eq!(lockdown.state, Some(ConsoleState::Menu(Menu::Security)));
        assert!(lockdown.effects.contains(&Effect::ToggleLockdown));

        let export = transition(
            ConsoleState::Menu(Menu::Users),
            &mut scratch,
            ConsoleEvent::Select(MenuAction::ExportCsv),
        );
        assert_eq!(export.state, Some(ConsoleState::Menu(Menu::Users)));
        assert!(export.effects.contains(&Effect::ExportUsers));
    }

    #[test]
    fn test_close_ends_session() {
        let mut scratch = Scratch::default();
        scratch.set("poll_question", "left over");

        let result = transition(
            ConsoleState::Menu(Menu::Root),
            &mut scratch,
            ConsoleEvent::Close,
        );
        assert_eq!(result.state, None);
        assert!(result.effects.contains(&Effect::CloseConsole));
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_menu_clicks_ignored_while_awaiting_input() {
        let mut scratch = Scratch::default();
        let result = transition(
            ConsoleState::AwaitingBanTarget,
            &mut scratch,
            ConsoleEvent::Navigate(Menu::Engagement),
        );
        // Stays put and re-prompts; a wizard answers only to input or cancel
        assert_eq!(result.state, Some(ConsoleState::AwaitingBanTarget));
    }

    #[test]
    fn test_text_in_menu_state_is_harmless() {
        let mut scratch = Scratch::default();
        let result = transition(
            ConsoleState::Menu(Menu::Root),
            &mut scratch,
            ConsoleEvent::Input("hello?".to_string()),
        );
        assert_eq!(result.state, Some(ConsoleState::Menu(Menu::Root)));
        assert!(result.effects.iter().all(|e| matches!(e, Effect::Notice(_))));
    }

    #[test]
    fn test_parse_callback_payloads() {
        assert_eq!(parse_callback("menu:users"), Some(ConsoleEvent::Navigate(Menu::Users)));
        assert_eq!(parse_callback("action:ban"), Some(ConsoleEvent::Select(MenuAction::BanStart)));
        assert_eq!(parse_callback("admin:cancel"), Some(ConsoleEvent::Cancel));
        assert_eq!(parse_callback("admin:close"), Some(ConsoleEvent::Close));
        assert_eq!(
            parse_callback("reformat:minimal"),
            Some(ConsoleEvent::Select(MenuAction::SetReformatStyle("minimal".to_string())))
        );
        assert_eq!(parse_callback("bogus"), None);
    }

    #[test]
    fn test_every_menu_payload_parses() {
        for menu in [Menu::Root, Menu::Users, Menu::Engagement, Menu::Config, Menu::Security] {
            for (label, payload) in menu.entries() {
                assert!(
                    parse_callback(payload).is_some(),
                    "menu entry {} has unparseable payload {}",
                    label,
                    payload
                );
            }
        }
    }
}
