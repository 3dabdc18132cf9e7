//! Fight engine integration tests
//!
//! Full fights driven through the prompt protocol exactly as a frontend
//! would drive them: read the step, answer the prompt, repeat. The
//! fixture AI always hits the first alive player unit so every walk is
//! reproducible.

use thornvale::fight::{
    Encounter, FightEngine, FightOutcome, FightStep, FirstTargetAi, Fight,
};
use thornvale::event::{GameEvent, Paragraph};
use thornvale::item::Item;
use thornvale::prompt::{Control, PromptAnswer, PromptRequest};
use thornvale::session::GameState;
use thornvale::unit::{Team, Unit};

fn party(units: Vec<Unit>) -> GameState {
    let mut state = GameState::default();
    for unit in units {
        state.team.add(unit).unwrap();
    }
    state
}

fn encounter(units: Vec<Unit>) -> Encounter {
    let mut team = Team::new(4);
    for unit in units {
        team.add(unit).unwrap();
    }
    Encounter::new("Foes ahead!", team)
}

/// Answer a choice prompt by label
fn choose(
    engine: &mut FightEngine,
    state: &mut GameState,
    step: &FightStep,
    label: &str,
) -> FightStep {
    let prompt = step.prompt().expect("expected a prompt");
    let PromptRequest::Choices(choices) = &prompt.request else {
        panic!("expected a choice prompt, got {:?}", prompt.request);
    };
    let id = choices
        .iter()
        .find(|c| c.label == label)
        .unwrap_or_else(|| panic!("no choice labelled {label:?} in {choices:?}"))
        .id;
    engine
        .resume(prompt.token, PromptAnswer::Chosen(id), state)
        .unwrap()
}

fn ack(engine: &mut FightEngine, state: &mut GameState, step: &FightStep) -> FightStep {
    let prompt = step.prompt().expect("expected a prompt");
    assert_eq!(prompt.request, PromptRequest::Acknowledge);
    engine
        .resume(prompt.token, PromptAnswer::Acknowledged, state)
        .unwrap()
}

fn finished(step: FightStep) -> thornvale::fight::FightResult {
    match step.control {
        Control::Finished(result) => result,
        other => panic!("expected the fight to finish, got {other:?}"),
    }
}

/// Two-round fight: the scout falls in round one, the spearman in round
/// two, and Victory pays out XP, loot, and the configured follow-up.
#[test]
fn test_two_round_victory_pays_out() {
    let mut state = party(vec![
        Unit::character("Alden", 30, 5, 6, 2),
        Unit::character("Bryn", 25, 7, 5, 1),
    ]);
    let mut next = GameEvent::new("aftermath");
    next.add_paragraph(Paragraph::new("The clearing falls silent."));
    let enc = encounter(vec![
        Unit::enemy("Goblin Scout", 9, 4, 4, 1, 8, vec![Item::relic("Fang")]),
        Unit::enemy("Goblin Spearman", 7, 3, 5, 2, 12, vec![]),
    ])
    .with_next_event(next);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    assert_eq!(step.messages, vec!["Foes ahead!"]);

    // Round 1: both party members pile onto the scout.
    let step = choose(&mut engine, &mut state, &step, "Fight");
    assert_eq!(step.messages, vec!["What should Alden do?"]);
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin Scout");
    assert_eq!(step.messages, vec!["What should Bryn do?"]);
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin Scout");

    // Bryn (speed 7) first, then Alden (5); the scout dies before its own
    // action fires, then the spearman (3) retaliates.
    assert_eq!(
        step.messages,
        vec![
            "Bryn hits Goblin Scout for 4 damage.",
            "Alden hits Goblin Scout for 5 damage.",
            "Goblin Scout is defeated.",
            "Goblin Spearman hits Alden for 3 damage.",
        ]
    );
    assert_eq!(state.team.find_by_name("Alden").unwrap().hp, 27);

    // Round 2: finish the spearman.
    let step = ack(&mut engine, &mut state, &step);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin Spearman");
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin Spearman");
    assert_eq!(
        step.messages,
        vec![
            "Bryn hits Goblin Spearman for 3 damage.",
            "Alden hits Goblin Spearman for 4 damage.",
            "Goblin Spearman is defeated.",
            "You win !",
            "Alden gains 20 XP.",
            "Bryn gains 20 XP.",
            "You got Fang !",
        ]
    );
    assert!(state.inventory.has_item("Fang"));

    let result = finished(ack(&mut engine, &mut state, &step));
    assert_eq!(result.outcome, FightOutcome::Victory);
    assert_eq!(result.next_event.unwrap().name, "aftermath");
}

/// A full inventory reports every loot item as undeliverable, in loot
/// order, without aborting distribution.
#[test]
fn test_loot_overflow_names_every_item_in_order() {
    let mut state = party(vec![Unit::character("Alden", 30, 5, 20, 2)]);
    for i in 0..state.inventory.capacity() {
        assert!(state.inventory.try_add(Item::relic(format!("Pebble {i}"))));
    }
    let enc = encounter(vec![Unit::enemy(
        "Goblin",
        5,
        1,
        1,
        0,
        8,
        vec![Item::relic("Fang"), Item::relic("Claw")],
    )]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin");

    let tail: Vec<&str> = step
        .messages
        .iter()
        .skip_while(|m| *m != "You win !")
        .map(String::as_str)
        .collect();
    assert_eq!(
        tail,
        vec![
            "You win !",
            "Alden gains 8 XP.",
            "You can't pick up Fang, your inventory is full.",
            "You can't pick up Claw, your inventory is full.",
        ]
    );
    assert!(!state.inventory.has_item("Fang"));
    assert!(!state.inventory.has_item("Claw"));
}

/// A potion queued against a unit that dies earlier in the round is
/// skipped and stays in the bag.
#[test]
fn test_potion_not_consumed_against_dead_target() {
    // Bryn is first in roster order, so the fixture AI focuses her.
    let mut state = party(vec![
        Unit::character("Bryn", 5, 2, 3, 0),
        Unit::character("Alden", 30, 1, 6, 2),
    ]);
    state.inventory.try_add(Item::potion("Minor Potion", 10));
    let enc = encounter(vec![Unit::enemy("Ogre", 60, 10, 99, 5, 30, vec![])]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Attack Ogre");
    let step = choose(&mut engine, &mut state, &step, "Use Minor Potion on Bryn");

    // The ogre acts first and downs Bryn; her attack and Alden's potion
    // are both skipped.
    assert!(state.team.find_by_name("Bryn").unwrap().is_dead());
    assert!(state.inventory.has_item("Minor Potion"));
    assert!(step.messages.iter().all(|m| !m.contains("uses")));
    // The fight goes on: Alden still stands.
    assert_eq!(step.prompt().unwrap().request, PromptRequest::Acknowledge);
}

/// A potion that does land is consumed and restores its printed amount.
#[test]
fn test_potion_heals_and_is_consumed() {
    let mut state = party(vec![
        Unit::character("Alden", 30, 5, 6, 2),
        Unit::character("Bryn", 25, 7, 5, 1),
    ]);
    state.inventory.try_add(Item::potion("Minor Potion", 10));
    let bryn = state.team.iter_mut().find(|u| u.name == "Bryn").unwrap();
    bryn.take_damage(12);
    let enc = encounter(vec![Unit::enemy("Goblin", 30, 1, 1, 5, 5, vec![])]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Use Minor Potion on Bryn");
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin");

    assert!(step
        .messages
        .contains(&"Alden uses Minor Potion on Bryn, restoring 10 HP.".to_string()));
    assert_eq!(state.team.find_by_name("Bryn").unwrap().hp, 23);
    assert!(!state.inventory.has_item("Minor Potion"));
}

/// Healing restores the healer's effective attack worth of HP.
#[test]
fn test_heal_action_uses_effective_attack() {
    let mut alden = Unit::character("Alden", 30, 5, 6, 2);
    alden.equip_weapon(Item::weapon("Iron Sword", 3));
    let mut state = party(vec![alden, Unit::character("Bryn", 25, 7, 5, 1)]);
    let bryn = state.team.iter_mut().find(|u| u.name == "Bryn").unwrap();
    bryn.take_damage(20);
    let enc = encounter(vec![Unit::enemy("Goblin", 30, 1, 1, 5, 5, vec![])]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Heal Bryn");
    let step = choose(&mut engine, &mut state, &step, "Attack Goblin");

    // 6 base + 3 from the sword.
    assert!(step
        .messages
        .contains(&"Alden heals Bryn for 9 HP.".to_string()));
    assert_eq!(state.team.find_by_name("Bryn").unwrap().hp, 14);
}

/// A fight suspended between rounds serializes and rebuilds exactly.
#[test]
fn test_intermediate_round_state_round_trips() {
    let mut state = party(vec![Unit::character("Alden", 300, 5, 6, 2)]);
    let enc = encounter(vec![Unit::enemy(
        "Goblin",
        500,
        4,
        3,
        1,
        5,
        vec![Item::relic("Fang")],
    )]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let _step = choose(&mut engine, &mut state, &step, "Attack Goblin");

    // Suspended at the round acknowledgment: teams carry round damage.
    let fight = engine.fight().expect("fight should still be live");
    let json = serde_json::to_string(fight).unwrap();
    let restored: Fight = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, fight);
    assert_eq!(restored.outcome, FightOutcome::NotFinished);
    assert_eq!(restored.enemy_team.units()[0].hp, 495);
}

/// Big rewards cross level thresholds during the Victory payout.
#[test]
fn test_victory_xp_levels_the_party() {
    let mut state = party(vec![Unit::character("Alden", 30, 5, 20, 2)]);
    let enc = encounter(vec![Unit::enemy("Troll", 10, 1, 1, 0, 150, vec![])]);

    let mut engine = FightEngine::new(Box::new(FirstTargetAi));
    let step = engine.begin(&enc, &mut state);
    let step = choose(&mut engine, &mut state, &step, "Fight");
    let step = choose(&mut engine, &mut state, &step, "Attack Troll");

    assert!(step
        .messages
        .contains(&"Alden gains 150 XP.".to_string()));
    assert!(step
        .messages
        .contains(&"Alden reaches level 2.".to_string()));
    let alden = state.team.find_by_name("Alden").unwrap();
    assert_eq!(alden.level(), Some(2));
    assert_eq!(alden.max_hp, 40);

    let result = finished(ack(&mut engine, &mut state, &step));
    assert_eq!(result.outcome, FightOutcome::Victory);
}
