/// The duel engine: a single reducer over typed inputs and outputs.
///
/// Wires together the cast, the turn ledger, the dialogue queue and the
/// script tables. The engine owns no clocks and renders nothing; drivers
/// feed it inputs and apply the outputs it returns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::core::combat::{self, ActionAvailability, Resolution, TurnState};
use crate::core::config::{ConfigError, DuelConfig};
use crate::core::dialogue::{Advance, DialogueQueue};
use crate::schema::beat::{Beat, BeatEffect, Choice, ChoiceAction, Ending, SceneEvent};
use crate::schema::character::{Cast, Character, Role};
use crate::schema::event::{
    CharacterSnapshot, GameSnapshot, Input, Output, Phase, PlayerAction, SignalId, TimerId,
    TurnSide,
};
use crate::script;

/// The mutable scene state, grouped so a restart is one replacement and a
/// snapshot is one read.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub cast: Cast,
    pub phase: Phase,
    pub turn: TurnState,
    pub warned_queen: bool,
}

impl GameContext {
    pub fn new(config: &DuelConfig) -> Self {
        Self {
            cast: Cast::new(
                config.player_health,
                config.opponent_health,
                config.king_health,
                config.queen_health,
            ),
            phase: Phase::Start,
            turn: TurnState::new(),
            warned_queen: false,
        }
    }
}

/// The top-level duel engine. Built via `DuelEngine::builder()`.
///
/// All randomness flows through one seeded generator, so a seed plus an
/// input sequence reproduces a session exactly, restarts included.
pub struct DuelEngine {
    config: DuelConfig,
    ctx: GameContext,
    queue: DialogueQueue,
    rng: StdRng,
    seed: u64,
    /// The attack currently suspended on an animation or an acknowledgement.
    resolution: Option<Resolution>,
    /// The one live enemy-turn timer, if any.
    enemy_timer: Option<TimerId>,
    retired_signals: FxHashSet<SignalId>,
    retired_timers: FxHashSet<TimerId>,
    next_signal: u64,
    next_timer: u64,
}

/// Builder for constructing a `DuelEngine`.
pub struct DuelEngineBuilder {
    seed: u64,
    config: DuelConfig,
}

impl DuelEngine {
    pub fn builder() -> DuelEngineBuilder {
        DuelEngineBuilder { seed: 0, config: DuelConfig::default() }
    }

    /// Apply one input and return the outputs it produced, in order.
    ///
    /// Inputs that make no sense in the current state (stale completions,
    /// actions out of turn) produce no outputs and are logged at debug.
    pub fn handle(&mut self, input: Input) -> Vec<Output> {
        debug!(?input, phase = self.ctx.phase.tag(), "input");
        let mut out = Vec::new();
        match input {
            Input::Start => self.start_game(&mut out),
            Input::Action { action } => self.player_action(action, &mut out),
            Input::Continue => self.advance_dialogue(&mut out),
            Input::Choose { index } => self.choose(index, &mut out),
            Input::AnimationDone { signal } => self.animation_done(signal, &mut out),
            Input::TimerFired { timer } => self.timer_fired(timer, &mut out),
        }
        out
    }

    pub fn phase(&self) -> Phase {
        self.ctx.phase
    }

    pub fn turn_side(&self) -> TurnSide {
        self.ctx.turn.side
    }

    pub fn turn_count(&self) -> u32 {
        self.ctx.turn.count
    }

    pub fn warned_queen(&self) -> bool {
        self.ctx.warned_queen
    }

    pub fn is_input_locked(&self) -> bool {
        self.ctx.turn.input_locked
    }

    pub fn player_defending(&self) -> bool {
        self.ctx.turn.player_defending
    }

    pub fn character(&self, role: Role) -> &Character {
        self.ctx.cast.get(role)
    }

    pub fn pending_choice(&self) -> Option<&[Choice]> {
        self.queue.pending_choice()
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.ctx.phase,
            turn_side: self.ctx.turn.side,
            turn_count: self.ctx.turn.count,
            player_defending: self.ctx.turn.player_defending,
            input_locked: self.ctx.turn.input_locked,
            warned_queen: self.ctx.warned_queen,
            characters: Role::ALL
                .iter()
                .map(|&role| {
                    let c = self.ctx.cast.get(role);
                    CharacterSnapshot {
                        role,
                        name: c.name,
                        current_health: c.current_health,
                        max_health: c.max_health,
                        is_dead: c.is_dead,
                    }
                })
                .collect(),
        }
    }

    // ---- input handlers ----

    fn start_game(&mut self, out: &mut Vec<Output>) {
        if self.ctx.phase != Phase::Start {
            debug!("start ignored outside the title screen");
            return;
        }
        info!(seed = self.seed, "session started");
        self.set_phase(Phase::Dialogue, out);
        out.push(Output::MenuHidden);
        self.queue.replace(script::INTRO.iter().copied());
        self.queue_advance(out);
    }

    fn player_action(&mut self, action: PlayerAction, out: &mut Vec<Output>) {
        if self.ctx.phase != Phase::Combat || self.ctx.turn.side != TurnSide::Player {
            debug!(?action, "action ignored out of phase or turn");
            return;
        }
        if self.ctx.turn.input_locked || self.resolution.is_some() {
            debug!(?action, "action ignored while resolution is in flight");
            return;
        }

        self.lock_input(out);
        self.clear_defense(out);

        match action {
            PlayerAction::Attack => self.begin_attack(Role::Player, Role::Opponent, out),
            PlayerAction::Defend => {
                self.ctx.turn.player_defending = true;
                self.perform_defend(Role::Player, out);
                self.finish_action(out);
            }
            PlayerAction::Speak => self.perform_speak(out),
            PlayerAction::DecisiveStrike => self.hesitation(out),
        }
    }

    fn advance_dialogue(&mut self, out: &mut Vec<Output>) {
        // A pending strike report consumes the acknowledgement first.
        if let Some(Resolution::Report { attacker, defender, damage }) = self.resolution {
            self.resolution = None;
            debug!(attacker = ?attacker, damage, "strike report acknowledged");
            let target = self.ctx.cast.get(defender);
            out.push(Output::HealthChanged {
                role: defender,
                current: target.current_health,
                max: target.max_health,
            });
            self.finish_action(out);
            return;
        }
        self.queue_advance(out);
    }

    fn choose(&mut self, index: usize, out: &mut Vec<Output>) {
        let Some(choice) = self.queue.select_choice(index) else {
            debug!(index, "choice ignored with nothing pending");
            return;
        };
        info!(label = choice.label, "choice selected");
        match choice.action {
            ChoiceAction::WarnQueen => {
                self.ctx.warned_queen = true;
                self.trigger_event(SceneEvent::WarnQueen, out);
            }
            ChoiceAction::TauntLaertes => {
                self.queue.push(script::TAUNT_DALLY);
                self.queue_advance(out);
            }
            ChoiceAction::Restart => self.restart(out),
        }
    }

    fn animation_done(&mut self, signal: SignalId, out: &mut Vec<Output>) {
        match self.resolution {
            Some(Resolution::Swing { attacker, defender, signal: expected })
                if expected == signal =>
            {
                self.retired_signals.insert(signal);
                self.resolve_strike(attacker, defender, out);
            }
            _ => {
                if self.retired_signals.contains(&signal) {
                    debug!(?signal, "duplicate completion for a retired signal");
                } else {
                    debug!(?signal, "completion for an unknown signal");
                }
            }
        }
    }

    fn timer_fired(&mut self, timer: TimerId, out: &mut Vec<Output>) {
        if self.enemy_timer != Some(timer) {
            if self.retired_timers.contains(&timer) {
                debug!(?timer, "stale enemy-turn timer");
            } else {
                debug!(?timer, "unknown timer");
            }
            return;
        }
        self.enemy_timer = None;
        self.retired_timers.insert(timer);

        // The scene may have moved on while the timer was pending.
        if self.ctx.phase != Phase::Combat
            || self.ctx.turn.side != TurnSide::Enemy
            || self.resolution.is_some()
        {
            debug!(?timer, "enemy-turn timer fired into a changed scene");
            return;
        }
        self.begin_attack(Role::Opponent, Role::Player, out);
    }

    // ---- combat flow ----

    fn begin_attack(&mut self, attacker: Role, defender: Role, out: &mut Vec<Output>) {
        let signal = self.alloc_signal();
        self.resolution = Some(Resolution::Swing { attacker, defender, signal });
        debug!(?attacker, ?defender, ?signal, "swing issued");
        out.push(Output::PlayAttack { attacker, defender, signal });
    }

    fn resolve_strike(&mut self, attacker: Role, defender: Role, out: &mut Vec<Output>) {
        let attacker_is_player = self.ctx.cast.get(attacker).is_player;
        let mut damage = combat::roll_damage(&mut self.rng, &self.config, attacker_is_player);
        if self.ctx.cast.get(defender).is_player && self.ctx.turn.player_defending {
            damage = combat::reduce_for_defense(damage, &self.config);
        }

        let target = self.ctx.cast.get_mut(defender);
        let was_dead = target.is_dead;
        target.take_damage(damage);
        let died = target.is_dead && !was_dead;

        debug!(?attacker, ?defender, damage, died, "strike resolved");
        if died {
            out.push(Output::CharacterDied { role: defender });
        }

        self.resolution = Some(Resolution::Report { attacker, defender, damage });
        let attacker_name = self.ctx.cast.get(attacker).name;
        self.queue.mark_showing();
        out.push(Output::ShowMessage {
            text: format!("{attacker_name} strikes! Deals {damage} damage."),
        });
    }

    fn perform_defend(&mut self, actor: Role, out: &mut Vec<Output>) {
        out.push(Output::PlayDefend { actor });
        let name = self.ctx.cast.get(actor).name;
        self.queue.mark_showing();
        out.push(Output::ShowMessage { text: format!("{name} raises their guard.") });
    }

    fn perform_speak(&mut self, out: &mut Vec<Output>) {
        // Nothing left to say to the Queen: needle Laertes and pass the turn.
        if self.ctx.warned_queen || self.ctx.cast.get(Role::Queen).is_dead {
            self.queue.push(script::TAUNT_WANTON);
            self.queue_advance(out);
            return;
        }

        if self.ctx.turn.count >= self.config.warn_choice_turn {
            self.show_choice(script::warn_or_taunt_choices(), out);
            return;
        }

        // Early-bout small talk: a random flavor line, then the turn passes.
        let line = script::FLAVOR_LINES[self.rng.gen_range(0..script::FLAVOR_LINES.len())];
        let idle = !self.queue.is_showing();
        self.queue.push(line);
        if idle {
            self.queue_advance(out);
        }
        self.next_turn(out);
    }

    fn hesitation(&mut self, out: &mut Vec<Output>) {
        let pair =
            &script::HESITATION_SEQUENCES[self.rng.gen_range(0..script::HESITATION_SEQUENCES.len())];
        self.queue.push(pair[0]);
        self.queue.push(pair[1]);
        self.queue_advance(out);
        // The turn is not consumed; the player may try again.
        self.unlock_input(out);
    }

    fn finish_action(&mut self, out: &mut Vec<Output>) {
        match combat::terminal_outcome(&self.ctx.cast) {
            Some(ending) => self.trigger_ending(ending, out),
            None => self.next_turn(out),
        }
    }

    fn next_turn(&mut self, out: &mut Vec<Output>) {
        self.ctx.turn.count += 1;
        self.ctx.turn.side = self.ctx.turn.side.other();
        debug!(count = self.ctx.turn.count, side = ?self.ctx.turn.side, "turn advanced");

        if self.ctx.turn.count > self.config.turn_limit {
            self.trigger_ending(Ending::DelayedStrike, out);
            return;
        }

        if self.ctx.turn.count == self.config.queen_drinks_turn
            && !self.ctx.warned_queen
            && !self.ctx.cast.get(Role::Queen).is_dead
        {
            self.trigger_event(SceneEvent::QueenDrinksNatural, out);
            return;
        }

        match self.ctx.turn.side {
            TurnSide::Enemy => {
                let timer = self.alloc_timer();
                if let Some(stale) = self.enemy_timer.replace(timer) {
                    self.retired_timers.insert(stale);
                }
                out.push(Output::ScheduleEnemyTurn {
                    delay_ms: self.config.enemy_turn_delay_ms,
                    timer,
                });
            }
            TurnSide::Player => {
                self.clear_defense(out);
                self.unlock_input(out);
            }
        }
    }

    // ---- dialogue flow ----

    fn queue_advance(&mut self, out: &mut Vec<Output>) {
        match self.queue.advance() {
            Advance::Shown(beat) => {
                self.apply_beat_effects(&beat, out);
                out.push(Output::ShowLine { speaker: beat.speaker, text: beat.text });
            }
            Advance::Drained => self.end_of_sequence(out),
            Advance::Idle => debug!("continue with an idle dialogue queue"),
        }
    }

    fn apply_beat_effects(&mut self, beat: &Beat, out: &mut Vec<Output>) {
        for effect in beat.effects {
            match *effect {
                BeatEffect::MarkDead { role } => {
                    let target = self.ctx.cast.get_mut(role);
                    if !target.is_dead {
                        target.die();
                        info!(?role, "scripted death");
                        out.push(Output::CharacterDied { role });
                    }
                }
                BeatEffect::BeginDrink { role } => out.push(Output::PlayDrink { actor: role }),
                BeatEffect::EndDrink { role } => out.push(Output::ClearDrink { actor: role }),
                BeatEffect::AdvanceTurn => self.next_turn(out),
            }
        }
    }

    fn end_of_sequence(&mut self, out: &mut Vec<Output>) {
        out.push(Output::DialogueDismissed);
        match self.ctx.phase {
            Phase::Dialogue => self.start_combat(out),
            Phase::Combat => out.push(Output::MenuShown),
            Phase::End => self.show_choice(script::restart_choices(), out),
            Phase::Start => {}
        }
    }

    fn show_choice(&mut self, choices: Vec<Choice>, out: &mut Vec<Output>) {
        let options: Vec<&'static str> = choices.iter().map(|c| c.label).collect();
        self.queue.present_choice(choices);
        out.push(Output::ShowChoice { options });
    }

    // ---- transitions ----

    fn start_combat(&mut self, out: &mut Vec<Output>) {
        self.set_phase(Phase::Combat, out);
        out.push(Output::MenuShown);
        self.ctx.turn.side = TurnSide::Player;
        self.unlock_input(out);
    }

    fn trigger_ending(&mut self, ending: Ending, out: &mut Vec<Output>) {
        info!(?ending, turn = self.ctx.turn.count, "ending triggered");
        self.set_phase(Phase::End, out);
        out.push(Output::MenuHidden);
        out.push(Output::EndingStarted { ending });
        self.queue.replace(script::ending_script(ending).iter().copied());
        self.queue_advance(out);
    }

    fn trigger_event(&mut self, event: SceneEvent, out: &mut Vec<Output>) {
        info!(?event, turn = self.ctx.turn.count, "scene event triggered");
        out.push(Output::MenuHidden);
        self.queue.replace(script::event_script(event).iter().copied());
        self.queue_advance(out);
    }

    fn restart(&mut self, out: &mut Vec<Output>) {
        info!(seed = self.seed, "session restarted");
        self.set_phase(Phase::Start, out);
        self.ctx = GameContext::new(&self.config);
        self.queue = DialogueQueue::new();
        self.resolution = None;
        if let Some(stale) = self.enemy_timer.take() {
            self.retired_timers.insert(stale);
        }
        out.push(Output::MenuHidden);
        out.push(Output::DialogueDismissed);
    }

    // ---- small helpers ----

    fn set_phase(&mut self, phase: Phase, out: &mut Vec<Output>) {
        if self.ctx.phase != phase {
            info!(from = self.ctx.phase.tag(), to = phase.tag(), "phase change");
            self.ctx.phase = phase;
            out.push(Output::PhaseChanged { phase });
        }
    }

    fn lock_input(&mut self, out: &mut Vec<Output>) {
        self.ctx.turn.input_locked = true;
        let a = ActionAvailability::locked();
        out.push(Output::ActionsEnabled {
            attack: a.attack,
            defend: a.defend,
            speak: a.speak,
            decisive: a.decisive,
        });
    }

    fn unlock_input(&mut self, out: &mut Vec<Output>) {
        self.ctx.turn.input_locked = false;
        let a = ActionAvailability::for_turn(self.ctx.turn.count, &self.config);
        out.push(Output::ActionsEnabled {
            attack: a.attack,
            defend: a.defend,
            speak: a.speak,
            decisive: a.decisive,
        });
    }

    fn clear_defense(&mut self, out: &mut Vec<Output>) {
        if self.ctx.turn.player_defending {
            self.ctx.turn.player_defending = false;
            out.push(Output::ClearDefend { actor: Role::Player });
        }
    }

    fn alloc_signal(&mut self) -> SignalId {
        let id = SignalId(self.next_signal);
        self.next_signal += 1;
        id
    }

    fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }
}

impl DuelEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: DuelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<DuelEngine, ConfigError> {
        self.config.validate()?;
        Ok(DuelEngine {
            ctx: GameContext::new(&self.config),
            config: self.config,
            queue: DialogueQueue::new(),
            rng: StdRng::seed_from_u64(self.seed),
            seed: self.seed,
            resolution: None,
            enemy_timer: None,
            retired_signals: FxHashSet::default(),
            retired_timers: FxHashSet::default(),
            next_signal: 0,
            next_timer: 0,
        })
    }
}
