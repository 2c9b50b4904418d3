//! Tests for the selection state machine and prompt rendering.
mod common;
use common::*;
use sentaku::flow::{self as selection, ButtonStyle, CLEAR_BUTTON_ID};
use sentaku::prelude::*;

#[test]
fn test_status_progression() {
    let flow = compile("{A:1/2} + {B:3/4}");

    assert_eq!(flow.status(&FlowState::default()), FlowStatus::Empty);
    assert_eq!(flow.status(&FlowState::with_selections(&["1"])), FlowStatus::Partial(1));
    assert_eq!(flow.status(&FlowState::with_selections(&["1", "3"])), FlowStatus::Complete);
}

#[test]
fn test_range_click_completes_single_placeholder() {
    let flow = flow("{Modifier:-4<=>10}");

    match flow.on_click(&FlowState::default(), "id8", "alice") {
        ClickOutcome::Complete { state, roll } => {
            assert_eq!(state.selections, vec!["3"]);
            assert_eq!(state.locked_user_name.as_deref(), Some("alice"));
            assert_eq!(roll.expression, "3");
        }
        other => panic!("Expected Complete, got {:?}", other),
    }
}

#[test]
fn test_button_id_resolves_to_its_value() {
    let flow = flow("{Dice:4@D4/6@D6/8@D8}");
    let prompt = flow.render_prompt(&FlowState::default());

    let wire = sentaku::codec::decode(&button(&prompt, "D6").id).unwrap();
    assert_eq!(wire.click_value, "id2");

    let state = FlowState::with_selections(&wire.selections);
    match flow.on_click(&state, &wire.click_value, "bob") {
        ClickOutcome::Complete { roll, .. } => {
            assert_eq!(roll.expression, "6");
            assert_eq!(roll.label.as_deref(), Some("Dice: D6"));
        }
        other => panic!("Expected Complete, got {:?}", other),
    }
}

#[test]
fn test_legacy_click_by_value() {
    let flow = flow("{Dice:4@D4/6@D6/8@D8}");

    let outcome = flow.on_click(&FlowState::default(), "8", "alice");
    assert!(matches!(outcome, ClickOutcome::Complete { ref roll, .. } if roll.expression == "8"));
}

#[test]
fn test_multi_step_selection() {
    let flow = flow("1d20+{Mod:0<=>2}+{Bonus:1/2}@Attack");

    let ClickOutcome::Continue(state) = flow.on_click(&FlowState::default(), "id3", "alice") else {
        panic!("Expected Continue");
    };
    assert_eq!(state.selections, vec!["2"]);

    match flow.on_click(&state, "id1", "alice") {
        ClickOutcome::Complete { roll, .. } => {
            assert_eq!(roll.expression, "1d20+2+1");
            assert_eq!(roll.label.as_deref(), Some("Attack"));
        }
        other => panic!("Expected Complete, got {:?}", other),
    }
}

#[test]
fn test_unknown_option_leaves_state_untouched() {
    let flow = flow("{A:1/2} + {B:3/4}");
    let state = FlowState::with_selections(&["1"]).locked_for("alice");

    match flow.on_click(&state, "id7", "alice") {
        ClickOutcome::Ignored { state: unchanged, reason } => {
            assert_eq!(unchanged, state);
            assert_eq!(
                reason,
                ClickError::UnknownOption {
                    option_id: "id7".to_string(),
                    placeholder: "{B:3/4}".to_string()
                }
            );
        }
        other => panic!("Expected Ignored, got {:?}", other),
    }
}

#[test]
fn test_lock_rejects_other_users() {
    let flow = flow("{A:1/2} + {B:3/4}");
    let ClickOutcome::Continue(state) = flow.on_click(&FlowState::default(), "id1", "alice") else {
        panic!("Expected Continue");
    };

    for clicked in ["id1", CLEAR_BUTTON_ID] {
        match flow.on_click(&state, clicked, "bob") {
            ClickOutcome::Ignored { state: unchanged, reason } => {
                assert_eq!(unchanged, state);
                assert_eq!(
                    reason,
                    ClickError::LockedByOtherUser {
                        owner: "alice".to_string(),
                        user: "bob".to_string()
                    }
                );
            }
            other => panic!("Expected Ignored, got {:?}", other),
        }
    }
}

#[test]
fn test_clear_resets_selection_and_lock() {
    let flow = flow("{A:1/2} + {B:3/4}");
    let state = FlowState::with_selections(&["2"]).locked_for("alice");

    let outcome = flow.on_click(&state, CLEAR_BUTTON_ID, "alice");
    assert_eq!(outcome, ClickOutcome::Cleared(FlowState::default()));
}

#[test]
fn test_direct_roll_fills_skipped_placeholders() {
    let flow = flow("{Mode:1d20@Normal/2d20k1@!Advantage} + {Mod:0<=>2}");

    match flow.on_click(&FlowState::default(), "id2", "alice") {
        ClickOutcome::Complete { state, roll } => {
            assert_eq!(state.selections, vec!["2d20k1"]);
            assert_eq!(roll.expression, "2d20k1 + ''");
            assert_eq!(roll.label.as_deref(), Some("Mode: Advantage"));
        }
        other => panic!("Expected Complete, got {:?}", other),
    }
}

#[test]
fn test_full_format_has_no_generated_label() {
    let config = Config::new("{Dice:4@D4/6@D6/8@D8}").with_answer_format(AnswerFormat::Full);
    let outcome = selection::on_click(&config, &FlowState::default(), "id1", "alice").unwrap();

    match outcome {
        ClickOutcome::Complete { roll, .. } => assert_eq!(roll.label, None),
        other => panic!("Expected Complete, got {:?}", other),
    }
}

#[test]
fn test_prompt_text() {
    let flow = flow("1d20+{Mod:0<=>2}+{Bonus:1/2}");
    assert_eq!(
        flow.render_prompt(&FlowState::default()).text,
        "Please select value for **Mod**"
    );

    let state = FlowState::with_selections(&["1"]).locked_for("alice");
    assert_eq!(
        flow.render_prompt(&state).text,
        "alice: Please select value for **Bonus**"
    );

    let config =
        Config::new("1d20+{Mod:0<=>2}+{Bonus:1/2}").with_answer_format(AnswerFormat::Full);
    let prompt = selection::render_prompt(&config, &state).unwrap();
    assert_eq!(
        prompt.text,
        "alice: 1d20+1+{Bonus}\nPlease select value for **Bonus**"
    );
}

#[test]
fn test_buttons_are_batched_in_rows() {
    let flow = flow("{A} + {B}");

    let prompt = flow.render_prompt(&FlowState::default());
    let sizes: Vec<usize> = prompt.rows.iter().map(|r| r.buttons.len()).collect();
    assert_eq!(sizes, vec![5, 5, 5]);
    assert!(prompt.buttons().all(|b| b.style == ButtonStyle::Primary));

    let prompt = flow.render_prompt(&FlowState::with_selections(&["3"]));
    let sizes: Vec<usize> = prompt.rows.iter().map(|r| r.buttons.len()).collect();
    assert_eq!(sizes, vec![5, 5, 5, 1]);
    let clear = &prompt.rows[3].buttons[0];
    assert_eq!(clear.label, "Clear");
    assert_eq!(clear.style, ButtonStyle::Danger);
    assert_eq!(sentaku::codec::decode(&clear.id).unwrap().click_value, CLEAR_BUTTON_ID);
}

#[test]
fn test_direct_roll_buttons_are_highlighted() {
    let flow = flow("{Mode:1d20@Normal/2d20k1@!Advantage} + {Mod:0<=>2}");
    let prompt = flow.render_prompt(&FlowState::default());

    assert_eq!(button(&prompt, "Normal").style, ButtonStyle::Primary);
    assert_eq!(button(&prompt, "Advantage").style, ButtonStyle::Success);
}

#[test]
fn test_button_ids_carry_selections_and_target() {
    let config = Config::new("{A:1/2} + {B:3/4}").with_answer_target(77);
    let flow = ParameterFlow::new(config, &Limits::default()).unwrap();
    let prompt = flow.render_prompt(&FlowState::with_selections(&["2"]));

    let wire = sentaku::codec::decode(&button(&prompt, "4").id).unwrap();
    assert_eq!(wire.command, "custom_parameter");
    assert_eq!(wire.selections, vec!["2"]);
    assert_eq!(wire.routing_target, Some(77));
    assert_eq!(wire.click_value, "id2");
}

#[test]
fn test_complete_state_renders_fresh_prompt() {
    let flow = flow("{A:1/2}");
    let complete = FlowState::with_selections(&["1"]).locked_for("alice");

    let prompt = flow.render_prompt(&complete);
    assert_eq!(prompt, flow.render_prompt(&FlowState::default()));
    let roll = flow.compiled.roll_request(&complete, AnswerFormat::Minimal);
    assert_eq!(roll.map(|r| r.expression).as_deref(), Some("1"));
}

#[test]
fn test_click_on_complete_state_is_ignored() {
    let flow = flow("{A:1/2}");
    let complete = FlowState::with_selections(&["1"]);

    let outcome = flow.on_click(&complete, "id2", "alice");
    assert!(matches!(
        outcome,
        ClickOutcome::Ignored { reason: ClickError::AlreadyComplete, .. }
    ));
    assert_eq!(outcome.state(), &complete);
}

#[test]
fn test_selections_that_were_never_offered_are_ignored() {
    let flow = flow("{Mode:1d20@Normal/2d20k1@!Advantage} + {A:1<=>3} + {B:1<=>3}");

    let cases = [
        (vec!["100d1000"], "100d1000", "{Mode:1d20@Normal/2d20k1@!Advantage}"),
        (vec!["1d20", "7"], "7", "{A:1<=>3}"),
        (vec!["2d20k1", "2"], "2", "{A:1<=>3}"),
    ];
    for (selections, option_id, placeholder) in cases {
        let state = FlowState::with_selections(&selections);
        match flow.on_click(&state, "id1", "alice") {
            ClickOutcome::Ignored { state: unchanged, reason } => {
                assert_eq!(unchanged, state);
                assert_eq!(
                    reason,
                    ClickError::UnknownOption {
                        option_id: option_id.to_string(),
                        placeholder: placeholder.to_string()
                    }
                );
            }
            other => panic!("Expected Ignored for {:?}, got {:?}", selections, other),
        }
    }

    let state = FlowState::with_selections(&["1d20", "2"]);
    assert_eq!(flow.compiled.check_selections(&state.selections), Ok(()));
    assert!(matches!(
        flow.on_click(&state, "id3", "alice"),
        ClickOutcome::Complete { ref roll, .. } if roll.expression == "1d20 + 2 + 3"
    ));
}
