//! The turn-by-turn play loop.

use std::io::{BufRead, Write};

use ht_mechanics::dice::roll_notation;
use ht_narrator::{ExampleStyle, Narrator, degrade};
use ht_session::{EventKind, SessionState, SessionStore};
use rand::Rng;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::PlayResult;
use crate::prompt;
use crate::roll_request::RollRequest;
use crate::sheet::render_sheet;

const RULE: &str = "==================================================";

const MENU: &str = "\nYour turn:
1. Take a suggested action
2. Take a custom action
3. Check character sheet
4. Save game
5. Quit game
6. Quest log";

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns the session for the life of the game and drives each turn.
pub struct TurnLoop<N, G> {
    state: SessionState,
    narrator: N,
    store: SessionStore,
    rng: G,
    system: String,
}

impl<N: Narrator, G: Rng> TurnLoop<N, G> {
    /// Create a loop over `state`.
    pub fn new(state: SessionState, narrator: N, store: SessionStore, rng: G) -> Self {
        Self {
            state,
            narrator,
            store,
            rng,
            system: prompt::system_prompt(None),
        }
    }

    /// Append a style example to the system prompt.
    pub fn with_example(mut self, example: Option<ExampleStyle>) -> Self {
        self.system = prompt::system_prompt(example);
        self
    }

    /// The current session.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Give back the session when play ends.
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Open a new adventure, then play until quit or end of input.
    pub fn start<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<()> {
        let opening = prompt::opening_prompt(&self.state.context());
        console.say(format!("\n{RULE}\nDungeon Master:"))?;
        let reply = self.narrate(console, opening)?;
        console.say(RULE)?;
        self.state.add_event(EventKind::DmResponse, reply);
        self.run(console)
    }

    /// Recap a loaded session, then play until quit or end of input.
    pub fn resume<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<()> {
        console.say(format!(
            "\nResuming {}: {} ({}) in {}",
            self.state.session_id,
            self.state.player.name,
            self.state.player.summary(),
            self.state.current_location
        ))?;
        let last_narration = self
            .state
            .history
            .entries()
            .iter()
            .rev()
            .find(|e| matches!(e.kind, EventKind::DmResponse | EventKind::Outcome));
        if let Some(event) = last_narration {
            console.say(format!("\n{RULE}\n{}\n{RULE}", event.description))?;
        }
        self.run(console)
    }

    /// Play turns until the player quits or input ends.
    pub fn run<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<()> {
        while self.turn(console)? == Flow::Continue {}
        Ok(())
    }

    fn turn<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<Flow> {
        console.say(MENU)?;
        let Some(choice) = console.ask("Choose (1-6): ")? else {
            debug!("input closed, ending session");
            return Ok(Flow::Quit);
        };
        match choice.as_str() {
            "1" => self.action(console, "Describe your action: "),
            "2" => self.action(console, "Describe your custom action: "),
            "3" => {
                console.say(render_sheet(&self.state.player))?;
                Ok(Flow::Continue)
            }
            "4" => {
                self.save(console)?;
                Ok(Flow::Continue)
            }
            "5" => self.quit(console),
            "6" => self.quests(console),
            _ => {
                console.say("Invalid choice. Please select a valid option.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn action<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
        question: &str,
    ) -> PlayResult<Flow> {
        let Some(action) = console.ask(question)? else {
            return Ok(Flow::Quit);
        };
        if action.is_empty() {
            console.say("You hesitate, and nothing happens.")?;
            return Ok(Flow::Continue);
        }

        self.state
            .add_event(EventKind::Action, format!("Player: {action}"));
        let turn = prompt::action_prompt(&self.state.context(), &action);
        console.say(format!("\n{RULE}"))?;
        let reply = self.narrate(console, turn)?;
        console.say(RULE)?;
        let request = RollRequest::detect(&reply);
        self.state.add_event(EventKind::DmResponse, reply);

        match request {
            Some(request) => self.roll_for(console, &action, request),
            None => Ok(Flow::Continue),
        }
    }

    fn roll_for<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
        action: &str,
        request: RollRequest,
    ) -> PlayResult<Flow> {
        console.say("\nThe DM has requested a dice roll!")?;
        let question = match request.suggested {
            Some(dice) => format!("Enter dice to roll [{dice}]: "),
            None => "Enter dice to roll (e.g. '1d20', '1d20+3', blank to skip): ".to_string(),
        };

        let result = loop {
            let Some(answer) = console.ask(&question)? else {
                return Ok(Flow::Quit);
            };
            let notation = match (answer.is_empty(), request.suggested) {
                (false, _) => answer,
                (true, Some(dice)) => dice.to_string(),
                (true, None) => {
                    console.say("Roll skipped.")?;
                    return Ok(Flow::Continue);
                }
            };
            match roll_notation(&notation, &mut self.rng) {
                Ok(result) => break result,
                Err(e) => console.say(format!("Error with dice roll: {e}"))?,
            }
        };

        let notation = result.expression.to_string();
        console.say(format!("You rolled {notation}: {result}"))?;
        self.state.add_event(
            EventKind::DiceRoll,
            format!("{notation}: {}", result.total),
        );

        let turn = prompt::roll_outcome_prompt(action, &notation, result.total);
        console.say(format!("\n{RULE}\nDungeon Master:"))?;
        let outcome = self.narrate(console, turn)?;
        console.say(RULE)?;
        self.state.add_event(EventKind::Outcome, outcome);
        Ok(Flow::Continue)
    }

    fn save<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<()> {
        match self.store.save(&mut self.state) {
            Ok(path) => console.say(format!("Game saved to {}", path.display())),
            Err(e) => console.say(format!("Failed to save game: {e}")),
        }
    }

    fn quit<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<Flow> {
        let answer = console.ask("Save before quitting? (y/n): ")?;
        if answer.is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")) {
            self.save(console)?;
        }
        console.say("Thanks for playing!")?;
        info!(session = %self.state.session_id, "player quit");
        Ok(Flow::Quit)
    }

    fn quests<I: BufRead, O: Write>(&mut self, console: &mut Console<I, O>) -> PlayResult<Flow> {
        let active = self.state.quests.active();
        if active.is_empty() {
            console.say("No active quests.")?;
        } else {
            console.say("Active quests:")?;
            for (i, quest) in active.iter().enumerate() {
                console.say(format!("  {}. {}", i + 1, quest.title))?;
            }
        }
        let completed = self.state.quests.all().len() - self.state.quests.active_count();
        if completed > 0 {
            console.say(format!("({completed} completed)"))?;
        }

        let Some(command) = console.ask("Quest command (add <title>, done <n>, blank to return): ")?
        else {
            return Ok(Flow::Quit);
        };
        let (verb, rest) = command.split_once(' ').unwrap_or((command.as_str(), ""));
        let rest = rest.trim();
        match verb.to_lowercase().as_str() {
            "" => {}
            "add" if !rest.is_empty() => {
                self.state.quests.add(rest);
                self.state
                    .add_event(EventKind::Note, format!("New quest: {rest}"));
                console.say(format!("Quest added: {rest}"))?;
            }
            "done" => {
                let done = rest
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.state.quests.complete_active(i));
                match done {
                    Some(title) => {
                        self.state
                            .add_event(EventKind::Note, format!("Completed quest: {title}"));
                        console.say(format!("Quest completed: {title}"))?;
                    }
                    None => console.say(format!("No active quest numbered '{rest}'."))?,
                }
            }
            _ => console.say("Unknown quest command.")?,
        }
        Ok(Flow::Continue)
    }

    /// Send a turn to the narrator, echoing text as it streams in.
    ///
    /// Failures come back as narration text.
    fn narrate<I: BufRead, O: Write>(
        &mut self,
        console: &mut Console<I, O>,
        turn: String,
    ) -> PlayResult<String> {
        let request = prompt::compose(&self.system, turn);
        let mut write_error = None;
        let mut streamed = false;
        let result = self.narrator.narrate(&request, &mut |text| {
            streamed = true;
            if let Err(e) = console.write_fragment(text) {
                write_error.get_or_insert(e);
            }
        });
        if let Some(e) = write_error {
            return Err(e.into());
        }
        let failed = result.is_err();
        let text = degrade(result);
        if failed {
            if streamed {
                console.say("")?;
            }
            console.say(&text)?;
        } else {
            console.say("")?;
        }
        Ok(text)
    }
}
