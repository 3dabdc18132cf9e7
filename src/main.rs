//! Thornvale - Entry Point
//!
//! A small playable tour of the simulation core: walk a map, talk
//! through events, fight encounters. Everything the loop does goes
//! through the same prompt protocol a real frontend would use.

use std::io::{self, Write};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use thornvale::core::{Coord, GameConfig, ParagraphId};
use thornvale::event::{Choice, EventEngine, GameEvent, Paragraph};
use thornvale::fight::{
    Encounter, EncounterTable, FightEngine, FightOutcome, RandomTargetAi,
};
use thornvale::item::Item;
use thornvale::map::{GameMap, Location};
use thornvale::prompt::{Control, Prompt, PromptAnswer, PromptRequest};
use thornvale::script::{Condition, Operation};
use thornvale::session::{GameState, Session};
use thornvale::unit::{Team, Unit};

fn main() -> io::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("thornvale=debug")
        .init();

    tracing::info!("Thornvale starting...");

    let mut session = new_session();
    let mut events = EventEngine::new();
    let mut fights = FightEngine::new(Box::new(RandomTargetAi::with_seed(42)));
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut saved = None;

    println!("\n=== THORNVALE ===");
    println!("A turn-based journey through one small valley");
    println!();
    println!("Commands:");
    println!("  look / l        - Describe the current location");
    println!("  go <n|e|s|w>    - Travel one step");
    println!("  talk            - Play the location's event");
    println!("  hunt            - Look for trouble");
    println!("  team            - Show the party");
    println!("  bag             - Show the inventory");
    println!("  equip <member> <item> - Arm a member from the bag");
    println!("  save / load     - Snapshot / restore the session");
    println!("  quit / q        - Exit");
    println!();
    describe(&session);

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "look" || input == "l" {
            describe(&session);
            continue;
        }

        if let Some(dir) = input.strip_prefix("go ") {
            let here = session.position();
            let dest = match dir.trim() {
                "n" => Coord::new(here.x, here.y + 1),
                "s" => Coord::new(here.x, here.y - 1),
                "e" => Coord::new(here.x + 1, here.y),
                "w" => Coord::new(here.x - 1, here.y),
                _ => {
                    println!("Usage: go <n|e|s|w>");
                    continue;
                }
            };
            match session.travel_to(dest) {
                Ok(()) => describe(&session),
                Err(err) => println!("You can't go that way: {err}"),
            }
            continue;
        }

        if input == "talk" {
            let event = session.here().and_then(|loc| loc.event.clone());
            match event {
                Some(event) => run_event(&mut events, event, &mut session.state)?,
                None => println!("Nobody here has anything to say."),
            }
            continue;
        }

        if input == "hunt" {
            let encounter = session
                .here()
                .and_then(|loc| loc.random_encounter(&mut rng).cloned());
            match encounter {
                Some(encounter) => {
                    let outcome =
                        run_fight(&mut fights, &mut events, &encounter, &mut session.state)?;
                    if outcome == FightOutcome::Defeat {
                        break;
                    }
                }
                None => println!("The area is quiet."),
            }
            continue;
        }

        if input == "team" {
            for unit in session.state.team.units() {
                let level = unit.level().map(|l| format!(" (level {l})")).unwrap_or_default();
                let weapon = unit
                    .weapon()
                    .map(|w| format!(", wielding {}", w.name))
                    .unwrap_or_default();
                println!(
                    "  {}{} - HP {}/{}, speed {}, attack {}, defense {}{}",
                    unit.name,
                    level,
                    unit.hp,
                    unit.max_hp,
                    unit.speed,
                    unit.effective_attack(),
                    unit.defense,
                    weapon
                );
            }
            continue;
        }

        if input == "bag" {
            for item in session.state.inventory.items() {
                println!("  {}", item.name);
            }
            println!("  Money: {}", session.state.inventory.money());
            continue;
        }

        if let Some(rest) = input.strip_prefix("equip ") {
            let mut parts = rest.splitn(2, ' ');
            let member = parts.next().unwrap_or("").trim();
            let weapon = parts.next().unwrap_or("").trim();
            if member.is_empty() || weapon.is_empty() {
                println!("Usage: equip <member> <item>");
                continue;
            }
            match session.state.equip_from_inventory(member, weapon) {
                Ok(()) => println!("{member} wields the {weapon}."),
                Err(err) => println!("{err}"),
            }
            continue;
        }

        if input == "save" {
            saved = Some(session.snapshot());
            println!("Saved.");
            continue;
        }

        if input == "load" {
            match &saved {
                Some(snapshot) => {
                    match Session::restore(snapshot.clone(), demo_map(), GameConfig::default()) {
                        Ok(restored) => {
                            session = restored;
                            println!("Loaded.");
                            describe(&session);
                        }
                        Err(err) => println!("Load failed: {err}"),
                    }
                }
                None => println!("Nothing saved yet."),
            }
            continue;
        }

        println!("Unknown command. Available: look, go <dir>, talk, hunt, team, bag, equip, save, load, quit");
    }

    println!("\nFarewell, traveller.");
    Ok(())
}

fn describe(session: &Session) {
    if let Some(location) = session.here() {
        println!("-- {} --", location.name);
    }
    let exits: Vec<String> = session
        .map
        .exits(session.position())
        .into_iter()
        .map(|c| {
            let here = session.position();
            let dir = match (c.x - here.x, c.y - here.y) {
                (0, 1) => "n",
                (0, -1) => "s",
                (1, 0) => "e",
                _ => "w",
            };
            session
                .map
                .location_at(c)
                .map(|l| format!("{} ({})", l.name, dir))
                .unwrap_or_default()
        })
        .collect();
    if !exits.is_empty() {
        println!("Paths lead to: {}", exits.join(", "));
    }
}

/// Print a step's narration and collect the player's answer until the
/// event finishes
fn run_event(engine: &mut EventEngine, event: GameEvent, state: &mut GameState) -> io::Result<()> {
    let mut step = match engine.start(event, state) {
        Ok(step) => step,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };
    loop {
        for line in &step.messages {
            println!("{line}");
        }
        let prompt = match &step.control {
            Control::Finished(()) => return Ok(()),
            Control::Prompt(prompt) => prompt.clone(),
        };
        let answer = read_answer(&prompt)?;
        step = match engine.resume(prompt.token, answer, state) {
            Ok(step) => step,
            Err(err) => {
                println!("{err}");
                return Ok(());
            }
        };
    }
}

fn run_fight(
    fights: &mut FightEngine,
    events: &mut EventEngine,
    encounter: &Encounter,
    state: &mut GameState,
) -> io::Result<FightOutcome> {
    let mut step = fights.begin(encounter, state);
    loop {
        for line in &step.messages {
            println!("{line}");
        }
        let prompt = match step.control {
            Control::Finished(result) => {
                if let Some(next) = result.next_event {
                    run_event(events, next, state)?;
                }
                return Ok(result.outcome);
            }
            Control::Prompt(ref prompt) => prompt.clone(),
        };
        let answer = read_answer(&prompt)?;
        step = match fights.resume(prompt.token, answer, state) {
            Ok(step) => step,
            Err(err) => {
                println!("{err}");
                return Ok(FightOutcome::NotFinished);
            }
        };
    }
}

fn read_answer(prompt: &Prompt) -> io::Result<PromptAnswer> {
    match &prompt.request {
        PromptRequest::Choices(choices) => {
            for choice in choices {
                println!("  [{}] {}", choice.id, choice.label);
            }
            loop {
                print!("> ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().read_line(&mut line)?;
                if let Ok(id) = line.trim().parse::<u32>() {
                    if choices.iter().any(|c| c.id == id) {
                        return Ok(PromptAnswer::Chosen(id));
                    }
                }
                println!("Pick one of the listed numbers.");
            }
        }
        PromptRequest::Acknowledge => {
            print!("[press Enter]");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            Ok(PromptAnswer::Acknowledged)
        }
    }
}

/// Fresh session: two-member party, starter gear, the demo map
fn new_session() -> Session {
    let mut state = GameState::default();
    let mut alden = Unit::character("Alden", 30, 5, 6, 2);
    alden.equip_weapon(Item::weapon("Iron Sword", 3));
    state.team.add(alden).ok();
    state.team.add(Unit::character("Bryn", 25, 7, 5, 1)).ok();
    state.inventory.try_add(Item::potion("Minor Potion", 10));
    state.inventory.add_money(20);

    match Session::new(state, demo_map(), Coord::new(0, 0)) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!("Demo map is broken: {}", err);
            std::process::exit(1);
        }
    }
}

fn demo_map() -> GameMap {
    let mut map = GameMap::new("Thornvale");
    map.add_location(
        Coord::new(0, 0),
        Location::new("Thornvale Village").with_event(elder_event()),
    );
    map.add_location(
        Coord::new(1, 0),
        Location::new("Darkpine Forest").with_encounters(
            EncounterTable::new()
                .with_row(0.6, wolf_encounter())
                .with_row(1.0, goblin_encounter()),
        ),
    );
    map.add_location(
        Coord::new(2, 0),
        Location::new("Old Bridge").with_event(bridge_event()),
    );
    map
}

fn elder_event() -> GameEvent {
    let mut event = GameEvent::new("elder");
    let errand = ParagraphId(1);
    event.add_paragraph(
        Paragraph::new("The village elder waves you over.")
            .with_choice(Choice::new("Hear her out").leading_to(errand))
            .with_choice(Choice::new("Walk past")),
    );
    event.add_paragraph(
        Paragraph::new(
            "\"Wolves again,\" the elder sighs. \"Thin them out and the bridge toll is yours.\"",
        )
        .with_operation(Operation::set_value("errand", "1"))
        .with_choice(Choice::new("\"Consider it done.\"")),
    );
    event
}

fn bridge_event() -> GameEvent {
    let mut event = GameEvent::new("bridge");
    event.add_paragraph(
        Paragraph::new("A toll keeper bars the bridge.")
            .with_choice(
                Choice::new("Show the elder's token")
                    .with_condition(Condition::value_at_least("errand", 1.0))
                    .with_operation(Operation::GiveMoney { amount: 30 }),
            )
            .with_choice(
                Choice::new("Pay 10 coins")
                    .with_condition(Condition::money_at_least(10))
                    .with_operation(Operation::TakeMoney { amount: 10 }),
            ),
    );
    event
}

fn wolf_encounter() -> Encounter {
    let mut team = Team::new(4);
    team.add(Unit::enemy("Grey Wolf", 14, 8, 5, 1, 10, vec![])).ok();
    Encounter::new("A grey wolf circles in from the treeline.", team)
}

fn goblin_encounter() -> Encounter {
    let mut team = Team::new(4);
    team.add(Unit::enemy("Goblin Scout", 12, 4, 4, 1, 8, vec![Item::relic("Goblin Totem")]))
        .ok();
    team.add(Unit::enemy(
        "Goblin Spearman",
        16,
        3,
        5,
        2,
        12,
        vec![Item::weapon("Worn Spear", 2)],
    ))
    .ok();
    Encounter::new("Goblins burst from the undergrowth!", team)
}
