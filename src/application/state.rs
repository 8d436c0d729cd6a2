//! Application state for the lookup front-end.
//!
//! `App` owns the search field, the focus, and the single [`UiState`] that
//! decides what the body of the screen shows. It never performs I/O: a
//! search produces a [`LookupRequest`] for the caller to execute, and the
//! outcome comes back through [`App::complete_lookup`].

use crate::application::{DisplaySurface, Element, LookupCompletion, LookupRequest};
use crate::domain::{CreatureCard, LookupError, Query};

/// What the body of the screen is showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    /// Nothing searched yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last search failed with this user-facing message
    Error(String),
    /// The last search produced this card
    Result(Box<CreatureCard>),
}

/// Which control receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Submit,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use dexcard::application::{App, UiState};
///
/// let mut app = App::default();
/// app.input = "  Pikachu ".to_string();
/// let request = app.submit_search().unwrap();
/// assert_eq!(request.query.as_str(), "pikachu");
/// assert_eq!(app.ui_state, UiState::Loading);
/// ```
#[derive(Debug)]
pub struct App {
    /// Raw text of the search field
    pub input: String,
    /// Cursor position within the search field, in characters
    pub cursor_position: usize,
    pub focus: Focus,
    pub ui_state: UiState,
    /// Token of the most recently issued lookup; 0 before the first one
    pub latest_token: u64,
    pub help_visible: bool,
    pub help_scroll: usize,
    /// Advances on every idle tick so the loading indicator can animate
    pub tick: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            focus: Focus::Input,
            ui_state: UiState::Idle,
            latest_token: 0,
            help_visible: false,
            help_scroll: 0,
            tick: 0,
        }
    }
}

impl App {
    /// Validates the search field and, when it holds a query, starts a lookup.
    ///
    /// An empty or whitespace-only field moves straight to the error state
    /// and returns `None`: no request is issued. The rejected submit still
    /// counts as the newest search action, so any lookup already in flight
    /// is superseded and its completion will be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexcard::application::{App, UiState};
    ///
    /// let mut app = App::default();
    /// app.input = "   ".to_string();
    /// assert!(app.submit_search().is_none());
    /// assert!(matches!(app.ui_state, UiState::Error(_)));
    /// ```
    pub fn submit_search(&mut self) -> Option<LookupRequest> {
        let query = Query::normalize(&self.input);
        if query.is_empty() {
            self.latest_token += 1;
            self.ui_state = UiState::Error(LookupError::EmptyInput.user_message().to_string());
            return None;
        }
        Some(self.begin_lookup(query))
    }

    /// Activates the submit control. Does nothing while it is disabled.
    ///
    /// The control is disabled for the whole of `Loading`; the confirm key
    /// in the input field goes through [`App::submit_search`] directly and
    /// is not affected.
    pub fn press_submit(&mut self) -> Option<LookupRequest> {
        if !self.submit_enabled() {
            return None;
        }
        self.submit_search()
    }

    /// Drops any previous card or error, enters `Loading`, and issues a
    /// request carrying a fresh token.
    ///
    /// # Arguments
    ///
    /// * `query` - Normalized, non-empty search term
    pub fn begin_lookup(&mut self, query: Query) -> LookupRequest {
        self.latest_token += 1;
        self.ui_state = UiState::Loading;
        LookupRequest {
            token: self.latest_token,
            query,
        }
    }

    /// Applies a finished lookup if it belongs to the newest search action.
    ///
    /// Returns `false` for superseded completions, which leave the state
    /// untouched.
    ///
    /// # Arguments
    ///
    /// * `completion` - Outcome of a lookup, tagged with its request token
    pub fn complete_lookup(&mut self, completion: LookupCompletion) -> bool {
        if completion.token != self.latest_token {
            tracing::debug!(
                token = completion.token,
                latest = self.latest_token,
                "discarding stale lookup completion"
            );
            return false;
        }

        self.ui_state = match completion.outcome {
            Ok(card) => UiState::Result(Box::new(card)),
            Err(err) => UiState::Error(err.user_message().to_string()),
        };
        true
    }

    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.ui_state, UiState::Loading)
    }

    /// Whether the submit control accepts presses. False while loading.
    pub fn submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Moves focus between the search field and the submit control.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Submit,
            Focus::Submit => Focus::Input,
        };
    }

    /// Inserts a character at the cursor and advances the cursor past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexcard::application::App;
    ///
    /// let mut app = App::default();
    /// app.insert_char('m');
    /// app.insert_char('w');
    /// app.move_cursor_left();
    /// app.insert_char('e');
    /// assert_eq!(app.input, "mew");
    /// assert_eq!(app.cursor_position, 2);
    /// ```
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    /// Removes the character left of the cursor (Backspace).
    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_offset(self.cursor_position - 1);
            self.input.remove(at);
            self.cursor_position -= 1;
        }
    }

    /// Removes the character under the cursor (Delete).
    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input_len() {
            let at = self.byte_offset(self.cursor_position);
            self.input.remove(at);
        }
    }

    /// Moves the cursor one character left, stopping at the start.
    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Moves the cursor one character right, stopping at the end.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_len();
    }

    /// Empties the search field and resets the cursor.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Opens or closes the help popup, always starting at the top.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
        self.help_scroll = 0;
    }

    /// Advances the animation counter by one frame.
    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Pushes the current state onto a display surface.
    pub fn present<S: DisplaySurface + ?Sized>(&self, surface: &mut S) {
        surface.set_text(Element::Input, &self.input);
        surface.set_enabled(Element::Submit, self.submit_enabled());

        match &self.ui_state {
            UiState::Idle => {
                surface.hide(Element::Loading);
                surface.set_text(Element::Error, "");
                surface.hide(Element::Error);
                surface.clear_card();
                surface.hide(Element::Results);
            }
            UiState::Loading => {
                surface.set_text(Element::Error, "");
                surface.hide(Element::Error);
                surface.clear_card();
                surface.hide(Element::Results);
                surface.show(Element::Loading);
            }
            UiState::Error(message) => {
                surface.hide(Element::Loading);
                surface.clear_card();
                surface.hide(Element::Results);
                surface.set_text(Element::Error, message);
                surface.show(Element::Error);
            }
            UiState::Result(card) => {
                surface.hide(Element::Loading);
                surface.set_text(Element::Error, "");
                surface.hide(Element::Error);
                surface.render_card(card);
                surface.show(Element::Results);
            }
        }
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}
