//! Scene command sequencing
//!
//! Steps through a scene's ordered command list. Commands are either
//! instantaneous (dialog display, music cues, teleport moves) or
//! time-extended (smooth moves); the cursor advances past a command as soon
//! as it has been evaluated once, so an in-progress command is always the
//! one behind the cursor. Music cues auto-chain into the following command;
//! nothing else does, deliberately — an instantly-satisfied move still
//! waits for input before the next command runs.

use crate::audio::backend::AudioBackend;
use crate::audio::MusicDirector;
use crate::foundation::math::{lerp, Vec2};
use crate::input::InputSnapshot;
use crate::scene::character::Character;
use crate::scene::dialog::DialogBox;
use crate::script::ScriptCommand;
use crate::text::FontAtlas;

/// Mutable scene state a command evaluation may touch
pub struct CommandContext<'a> {
    /// Dialog box receiving Dialog commands
    pub dialog: &'a mut DialogBox,
    /// Character roster addressed by name
    pub characters: &'a mut [Character],
    /// Music director receiving Music commands
    pub music: &'a mut MusicDirector,
    /// Audio backend the director plays through
    pub audio: &'a mut dyn AudioBackend,
    /// Shared glyph atlas for dialog layout
    pub atlas: &'a FontAtlas,
}

/// Where the cursor is in the command list's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// `start` has not run yet
    NotStarted,
    /// Commands remain
    Running,
    /// Cursor has moved past the final command
    Finished,
}

/// State machine stepping a scene's command list
pub struct CommandSequencer {
    cursor: usize,
    in_progress: bool,
    elapsed: f32,
    started: bool,
    move_anchor: Option<Vec2>,
    advance_was_held: bool,
}

impl CommandSequencer {
    /// Create a sequencer positioned before the first command
    pub fn new() -> Self {
        Self {
            cursor: 0,
            in_progress: false,
            elapsed: 0.0,
            started: false,
            move_anchor: None,
            advance_was_held: false,
        }
    }

    /// Begin the scene: the first command fires without waiting for input
    pub fn start(&mut self, commands: &[ScriptCommand], input: InputSnapshot, ctx: &mut CommandContext) {
        self.started = true;
        self.execute_next(commands, input, ctx);
    }

    /// Lifecycle state of the cursor
    pub fn cursor_state(&self, commands: &[ScriptCommand]) -> CursorState {
        if !self.started {
            CursorState::NotStarted
        } else if self.is_finished(commands) {
            CursorState::Finished
        } else {
            CursorState::Running
        }
    }

    /// Whether the cursor has moved past the final command
    pub fn is_finished(&self, commands: &[ScriptCommand]) -> bool {
        self.cursor > commands.len()
    }

    /// Whether a time-extended command is still running
    pub fn is_command_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Whether `start` has run
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Index of the next command to execute
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Execute the command at the cursor and advance
    ///
    /// The command is evaluated once with zero elapsed time to capture its
    /// instantaneous effects. If that single evaluation satisfies it and it
    /// is a Music cue, the sequencer chains straight into the following
    /// command; otherwise the cursor advances by one and any unsatisfied
    /// command is left in progress. No-op once finished.
    pub fn execute_next(
        &mut self,
        commands: &[ScriptCommand],
        input: InputSnapshot,
        ctx: &mut CommandContext,
    ) {
        if self.is_finished(commands) {
            return;
        }

        self.in_progress = false;
        self.elapsed = 0.0;
        self.move_anchor = None;

        if self.cursor < commands.len() {
            let command = &commands[self.cursor];
            let finished = self.process(command, input.skip_held, ctx);
            self.in_progress = !finished;

            if finished && matches!(command, ScriptCommand::Music { .. }) {
                self.cursor += 1;
                self.execute_next(commands, input, ctx);
                return;
            }
        }

        self.cursor += 1;
    }

    /// Advance a time-extended command by `delta_time`
    pub fn tick(
        &mut self,
        delta_time: f32,
        commands: &[ScriptCommand],
        input: InputSnapshot,
        ctx: &mut CommandContext,
    ) {
        if !self.in_progress || self.cursor == 0 || self.cursor > commands.len() {
            return;
        }

        self.elapsed += delta_time;
        let command = &commands[self.cursor - 1];
        if self.process(command, input.skip_held, ctx) {
            self.in_progress = false;
        }
    }

    /// Apply one frame of player input
    ///
    /// The skip modifier force-completes everything and, when the dialog
    /// animation was already finished, advances in the same input sample.
    /// Plain advance latches on key-down and only advances once the dialog
    /// is fully revealed and its cooldown has elapsed; otherwise it
    /// force-completes the running animation instead.
    pub fn advance_requested(
        &mut self,
        commands: &[ScriptCommand],
        input: InputSnapshot,
        ctx: &mut CommandContext,
    ) {
        if input.skip_held {
            if ctx.dialog.is_animation_complete() {
                self.complete_current_animations(commands, ctx);
                self.execute_next(commands, input, ctx);
            } else {
                self.complete_current_animations(commands, ctx);
            }
            return;
        }

        if input.advance_held {
            if !self.advance_was_held {
                if ctx.dialog.is_animation_complete() {
                    if ctx.dialog.can_advance() {
                        self.complete_current_animations(commands, ctx);
                        self.execute_next(commands, input, ctx);
                    }
                } else {
                    self.complete_current_animations(commands, ctx);
                }
                self.advance_was_held = true;
            }
        } else {
            self.advance_was_held = false;
        }
    }

    /// Force-finish the dialog reveal and snap any in-progress move
    fn complete_current_animations(&mut self, commands: &[ScriptCommand], ctx: &mut CommandContext) {
        ctx.dialog.complete();

        if !self.in_progress || self.cursor == 0 || self.cursor > commands.len() {
            return;
        }

        if let ScriptCommand::Move { character, position, .. } = &commands[self.cursor - 1] {
            if let Some(target) = find_character(ctx.characters, character) {
                target.set_position(Vec2::from(*position));
            }
            self.in_progress = false;
        }
    }

    /// Evaluate one command; returns whether it is satisfied
    fn process(&mut self, command: &ScriptCommand, skip_held: bool, ctx: &mut CommandContext) -> bool {
        match command {
            ScriptCommand::Dialog {
                character,
                text,
                expression,
            } => {
                ctx.dialog.set_line(text, ctx.atlas);
                // An empty speaker clears the previously displayed name
                ctx.dialog.set_speaker(character, ctx.atlas);

                if !expression.is_empty() {
                    if let Some(target) = find_character(ctx.characters, character) {
                        target.set_expression(expression);
                    }
                }
                true
            }

            ScriptCommand::Move {
                character,
                position,
                duration,
                smooth,
            } => {
                let Some(target) = find_character(ctx.characters, character) else {
                    // Unknown characters satisfy the command vacuously
                    log::warn!("Move command references unknown character '{}'", character);
                    return true;
                };

                let destination = Vec2::from(*position);
                if *duration > 0.0 && *smooth && !skip_held {
                    let anchor = *self.move_anchor.get_or_insert(target.position());
                    let progress = (self.elapsed / duration).min(1.0);
                    target.set_position(lerp(anchor, destination, progress));
                    progress >= 1.0
                } else {
                    target.set_position(destination);
                    true
                }
            }

            ScriptCommand::Music {
                track,
                volume,
                fade_in,
                fade_out,
                looped,
            } => {
                let result = if track.is_empty() {
                    ctx.music.stop(*fade_out, ctx.audio)
                } else {
                    ctx.music
                        .play(track, *volume, *fade_in, *fade_out, *looped, ctx.audio)
                };
                if let Err(e) = result {
                    log::warn!("Music command failed: {}", e);
                }
                true
            }
        }
    }
}

impl Default for CommandSequencer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_character<'a>(characters: &'a mut [Character], name: &str) -> Option<&'a mut Character> {
    characters.iter_mut().find(|c| c.name() == name)
}
