//! Fight resolution engine
//!
//! Drives one fight at a time through the prompt protocol. Each round:
//! a fight-or-escape prompt, then one action prompt per alive player
//! unit in roster order (Back steps the cursor one unit backwards and
//! discards that unit's queued action), then the enemy AI fills in its
//! side, the merged list executes by descending speed, and the outcome
//! is re-evaluated. Defeat beats Victory on a mutual wipeout.

use crate::core::error::{GameError, Result};
use crate::core::types::UnitId;
use crate::event::GameEvent;
use crate::fight::action::{order_by_speed, CombatAction, UnitRef};
use crate::fight::ai::EnemyAi;
use crate::fight::encounter::Encounter;
use crate::fight::{Fight, FightOutcome, FightResult};
use crate::item::{Inventory, ItemKind};
use crate::prompt::{ChoiceDescriptor, Prompt, PromptAnswer, PromptRequest, PromptToken, Step, TokenSeq};
use crate::session::GameState;
use crate::unit::{Team, UnitKind};

/// Step payload for fights
pub type FightStep = Step<FightResult>;

const FIGHT: u32 = 0;
const ESCAPE: u32 = 1;

enum Phase {
    AwaitFightOrEscape,
    AwaitAction { cursor: usize },
    AwaitRoundAck,
    AwaitEndAck { result: FightResult },
}

struct ActiveFight {
    fight: Fight,
    phase: Phase,
    /// Player units alive at round start; prompting follows this order
    roster: Vec<UnitId>,
    /// Concrete action per offered menu id; the id one past the end is Back
    menu: Vec<CombatAction>,
    next_event: Option<GameEvent>,
    token: PromptToken,
}

/// Runs fights, one at a time
pub struct FightEngine {
    active: Option<ActiveFight>,
    tokens: TokenSeq,
    ai: Box<dyn EnemyAi>,
}

impl FightEngine {
    pub fn new(ai: Box<dyn EnemyAi>) -> Self {
        Self {
            active: None,
            tokens: TokenSeq::default(),
            ai,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Fight state of the fight in progress
    pub fn fight(&self) -> Option<&Fight> {
        self.active.as_ref().map(|active| &active.fight)
    }

    /// Spawn the encounter's enemy team and open the first round,
    /// cancelling any fight already running
    ///
    /// A fight that is decided before any round (an empty enemy roster,
    /// a party already down) ends without prompting for actions.
    pub fn begin(&mut self, encounter: &Encounter, state: &mut GameState) -> FightStep {
        if self.active.take().is_some() {
            tracing::debug!("New fight begins, cancelling the active fight");
        }
        self.tokens.invalidate();

        let fight = Fight::new(encounter.enemy_team.instantiate());
        tracing::info!(
            "Fight begins: {} party members vs {} foes",
            state.team.alive().count(),
            fight.enemy_team.len()
        );
        let active = ActiveFight {
            fight,
            phase: Phase::AwaitFightOrEscape,
            roster: Vec::new(),
            menu: Vec::new(),
            next_event: encounter.next_event.clone(),
            token: self.tokens.mint(),
        };
        let messages = vec![encounter.intro.clone()];
        match decide_outcome(&state.team, &active.fight.enemy_team) {
            FightOutcome::Defeat => self.end_in_defeat(active, messages),
            FightOutcome::Victory => self.end_in_victory(active, state, messages),
            _ => self.begin_round(active, state, messages),
        }
    }

    /// Deliver the answer to the pending prompt and advance the fight
    ///
    /// Rejected without effect when no fight is active, the token is
    /// stale, or the answer does not fit the prompt; in the last case
    /// the prompt stays live and can be answered again.
    pub fn resume(
        &mut self,
        token: PromptToken,
        answer: PromptAnswer,
        state: &mut GameState,
    ) -> Result<FightStep> {
        let mut active = match self.active.take() {
            Some(active) => active,
            None => {
                tracing::warn!("Fight answer arrived with no fight awaiting one");
                return Err(GameError::InvalidState(
                    "no fight is awaiting an answer".into(),
                ));
            }
        };
        if token != active.token {
            self.active = Some(active);
            tracing::warn!("Stale fight prompt token ignored");
            return Err(GameError::InvalidState("prompt token is stale".into()));
        }

        let phase = std::mem::replace(&mut active.phase, Phase::AwaitFightOrEscape);
        match phase {
            Phase::AwaitFightOrEscape => match answer {
                PromptAnswer::Chosen(FIGHT) => Ok(self.prompt_action(active, state, 0)),
                PromptAnswer::Chosen(ESCAPE) => {
                    active.fight.escape = true;
                    Ok(self.end_in_escape(active, Vec::new()))
                }
                _ => self.reject(active, Phase::AwaitFightOrEscape),
            },
            Phase::AwaitAction { cursor } => {
                let back = active.menu.len() as u32;
                match answer {
                    PromptAnswer::Chosen(id) if id == back => {
                        if cursor == 0 {
                            // Backing out of the first unit re-opens the
                            // round-level fight-or-escape question.
                            Ok(self.begin_round(active, state, Vec::new()))
                        } else {
                            active.fight.actions.pop();
                            Ok(self.prompt_action(active, state, cursor - 1))
                        }
                    }
                    PromptAnswer::Chosen(id) if (id as usize) < active.menu.len() => {
                        let action = active.menu[id as usize].clone();
                        active.fight.actions.push(action);
                        if cursor + 1 < active.roster.len() {
                            Ok(self.prompt_action(active, state, cursor + 1))
                        } else {
                            Ok(self.execute_round(active, state))
                        }
                    }
                    _ => self.reject(active, Phase::AwaitAction { cursor }),
                }
            }
            Phase::AwaitRoundAck => match answer {
                PromptAnswer::Acknowledged => Ok(self.begin_round(active, state, Vec::new())),
                _ => self.reject(active, Phase::AwaitRoundAck),
            },
            Phase::AwaitEndAck { result } => match answer {
                PromptAnswer::Acknowledged => Ok(Step::finished(Vec::new(), result)),
                _ => self.reject(active, Phase::AwaitEndAck { result }),
            },
        }
    }

    /// Put the untouched fight back and report the mismatch
    fn reject(&mut self, mut active: ActiveFight, phase: Phase) -> Result<FightStep> {
        active.phase = phase;
        self.active = Some(active);
        Err(GameError::InvalidState(
            "answer does not match the pending prompt".into(),
        ))
    }

    fn begin_round(
        &mut self,
        mut active: ActiveFight,
        state: &GameState,
        messages: Vec<String>,
    ) -> FightStep {
        active.roster = state.team.alive_ids();
        active.fight.current_actor = None;
        active.fight.actions.clear();
        let choices = vec![
            ChoiceDescriptor::new(FIGHT, "Fight"),
            ChoiceDescriptor::new(ESCAPE, "Escape"),
        ];
        self.suspend(
            active,
            Phase::AwaitFightOrEscape,
            messages,
            PromptRequest::Choices(choices),
        )
    }

    /// Offer the unit at `cursor` its action menu: attack any alive foe,
    /// heal any alive member, use any held potion on any alive member,
    /// or Back
    fn prompt_action(&mut self, mut active: ActiveFight, state: &GameState, cursor: usize) -> FightStep {
        let actor_id = active.roster[cursor];
        active.fight.current_actor = Some(actor_id);
        let actor = UnitRef::player(actor_id);

        let mut messages = Vec::new();
        if let Some(unit) = state.team.unit(actor_id) {
            messages.push(format!("What should {} do?", unit.name));
        }

        let mut menu = Vec::new();
        let mut choices = Vec::new();
        for enemy in active.fight.enemy_team.alive() {
            choices.push(ChoiceDescriptor::new(
                menu.len() as u32,
                format!("Attack {}", enemy.name),
            ));
            menu.push(CombatAction::Attack {
                actor,
                target: UnitRef::enemy(enemy.id),
            });
        }
        for member in state.team.alive() {
            choices.push(ChoiceDescriptor::new(
                menu.len() as u32,
                format!("Heal {}", member.name),
            ));
            menu.push(CombatAction::Heal {
                actor,
                target: UnitRef::player(member.id),
            });
        }
        for potion in state.inventory.potions() {
            for member in state.team.alive() {
                choices.push(ChoiceDescriptor::new(
                    menu.len() as u32,
                    format!("Use {} on {}", potion.name, member.name),
                ));
                menu.push(CombatAction::UseItem {
                    actor,
                    target: UnitRef::player(member.id),
                    item: potion.clone(),
                });
            }
        }
        choices.push(ChoiceDescriptor::new(menu.len() as u32, "Back"));
        active.menu = menu;
        self.suspend(
            active,
            Phase::AwaitAction { cursor },
            messages,
            PromptRequest::Choices(choices),
        )
    }

    fn execute_round(&mut self, mut active: ActiveFight, state: &mut GameState) -> FightStep {
        active.fight.current_actor = None;
        let mut actions = std::mem::take(&mut active.fight.actions);
        actions.extend(self.ai.decide(&active.fight.enemy_team, &state.team));
        order_by_speed(&mut actions, &state.team, &active.fight.enemy_team);

        let mut messages = Vec::new();
        for action in &actions {
            execute_action(
                action,
                &mut state.team,
                &mut active.fight,
                &mut state.inventory,
                state.config.damage_floor,
                &mut messages,
            );
        }

        match decide_outcome(&state.team, &active.fight.enemy_team) {
            FightOutcome::Defeat => self.end_in_defeat(active, messages),
            FightOutcome::Victory => self.end_in_victory(active, state, messages),
            _ => self.suspend(
                active,
                Phase::AwaitRoundAck,
                messages,
                PromptRequest::Acknowledge,
            ),
        }
    }

    fn end_in_victory(
        &mut self,
        mut active: ActiveFight,
        state: &mut GameState,
        mut messages: Vec<String>,
    ) -> FightStep {
        active.fight.outcome = FightOutcome::Victory;
        messages.push("You win !".to_string());
        let xp = active.fight.xp;
        if xp > 0 {
            let step = state.config.xp_level_step;
            for member in state.team.iter_mut() {
                messages.push(format!("{} gains {} XP.", member.name, xp));
                if member.gain_xp(xp, step) > 0 {
                    if let Some(level) = member.level() {
                        messages.push(format!("{} reaches level {}.", member.name, level));
                    }
                }
            }
        }
        for item in active.fight.loot.drain(..) {
            if state.inventory.try_add(item.clone()) {
                messages.push(format!("You got {} !", item.name));
            } else {
                messages.push(format!(
                    "You can't pick up {}, your inventory is full.",
                    item.name
                ));
            }
        }
        let result = FightResult {
            outcome: FightOutcome::Victory,
            next_event: active.next_event.take(),
        };
        self.suspend(
            active,
            Phase::AwaitEndAck { result },
            messages,
            PromptRequest::Acknowledge,
        )
    }

    fn end_in_escape(&mut self, mut active: ActiveFight, mut messages: Vec<String>) -> FightStep {
        active.fight.outcome = FightOutcome::Escape;
        active.fight.actions.clear();
        messages.push("You escape successfully.".to_string());
        let result = FightResult {
            outcome: FightOutcome::Escape,
            next_event: active.next_event.take(),
        };
        self.suspend(
            active,
            Phase::AwaitEndAck { result },
            messages,
            PromptRequest::Acknowledge,
        )
    }

    /// Defeat ends the fight on the spot: no acknowledgment, no rewards,
    /// no follow-up event
    fn end_in_defeat(&mut self, mut active: ActiveFight, mut messages: Vec<String>) -> FightStep {
        active.fight.outcome = FightOutcome::Defeat;
        messages.push("You lose ! Game over !".to_string());
        Step::finished(
            messages,
            FightResult {
                outcome: FightOutcome::Defeat,
                next_event: None,
            },
        )
    }

    fn suspend(
        &mut self,
        mut active: ActiveFight,
        phase: Phase,
        messages: Vec<String>,
        request: PromptRequest,
    ) -> FightStep {
        let token = self.tokens.mint();
        active.phase = phase;
        active.token = token;
        self.active = Some(active);
        Step::suspended(messages, Prompt { token, request })
    }
}

/// Defeat is checked before Victory: a mutual wipeout is a loss.
/// Escape never comes from here; it is chosen, not derived.
fn decide_outcome(players: &Team, enemies: &Team) -> FightOutcome {
    if players.all_dead() {
        FightOutcome::Defeat
    } else if enemies.all_dead() {
        FightOutcome::Victory
    } else {
        FightOutcome::NotFinished
    }
}

/// Apply one action against the live teams
///
/// A dead or missing actor is skipped. A dead or missing target makes
/// the effect a silent no-op; a skipped potion is not consumed.
fn execute_action(
    action: &CombatAction,
    players: &mut Team,
    fight: &mut Fight,
    inventory: &mut Inventory,
    damage_floor: i32,
    messages: &mut Vec<String>,
) {
    let Some(actor) = action.actor().resolve(players, &fight.enemy_team) else {
        return;
    };
    if actor.is_dead() {
        return;
    }
    let actor_name = actor.name.clone();
    let power = actor.effective_attack();

    match action {
        CombatAction::Attack { target, .. } => {
            let Some(victim) = target.resolve_mut(players, &mut fight.enemy_team) else {
                return;
            };
            if victim.is_dead() {
                return;
            }
            let damage = (power - victim.defense).max(damage_floor);
            victim.take_damage(damage);
            messages.push(format!(
                "{} hits {} for {} damage.",
                actor_name, victim.name, damage
            ));
            if victim.is_dead() {
                messages.push(format!("{} is defeated.", victim.name));
                let reward = match &victim.kind {
                    UnitKind::Enemy { xp_reward, loot } => Some((*xp_reward, loot.clone())),
                    UnitKind::Character { .. } => None,
                };
                if let Some((xp, loot)) = reward {
                    fight.xp += xp;
                    fight.loot.extend(loot);
                }
            }
        }
        CombatAction::Heal { target, .. } => {
            let Some(patient) = target.resolve_mut(players, &mut fight.enemy_team) else {
                return;
            };
            if patient.is_dead() {
                return;
            }
            let restored = patient.heal(power);
            messages.push(format!(
                "{} heals {} for {} HP.",
                actor_name, patient.name, restored
            ));
        }
        CombatAction::UseItem { target, item, .. } => {
            let ItemKind::Potion { restore } = item.kind else {
                return;
            };
            let Some(patient) = target.resolve_mut(players, &mut fight.enemy_team) else {
                return;
            };
            if patient.is_dead() {
                return;
            }
            if inventory.remove(&item.name).is_none() {
                tracing::warn!("{} is no longer in the inventory", item.name);
                return;
            }
            let restored = patient.heal(restore);
            messages.push(format!(
                "{} uses {} on {}, restoring {} HP.",
                actor_name, item.name, patient.name, restored
            ));
        }
    }
}
