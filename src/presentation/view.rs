use crate::application::{DisplaySurface, Element};
use crate::domain::CreatureCard;

/// Terminal-side mirror of the page elements the application drives.
///
/// `App::present` writes into this; `render_ui` only reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalView {
    pub input_text: String,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub error_visible: bool,
    pub error_text: String,
    pub results_visible: bool,
    pub card: Option<CreatureCard>,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            submit_enabled: true,
            loading_visible: false,
            error_visible: false,
            error_text: String::new(),
            results_visible: false,
            card: None,
        }
    }
}

impl TerminalView {
    fn visibility_mut(&mut self, element: Element) -> Option<&mut bool> {
        match element {
            Element::Loading => Some(&mut self.loading_visible),
            Element::Error => Some(&mut self.error_visible),
            Element::Results => Some(&mut self.results_visible),
            // Input and submit are always on screen.
            Element::Input | Element::Submit => None,
        }
    }
}

impl DisplaySurface for TerminalView {
    fn set_text(&mut self, element: Element, text: &str) {
        match element {
            Element::Input => self.input_text = text.to_string(),
            Element::Error => self.error_text = text.to_string(),
            Element::Submit | Element::Loading | Element::Results => {}
        }
    }

    fn show(&mut self, element: Element) {
        if let Some(flag) = self.visibility_mut(element) {
            *flag = true;
        }
    }

    fn hide(&mut self, element: Element) {
        if let Some(flag) = self.visibility_mut(element) {
            *flag = false;
        }
    }

    fn set_enabled(&mut self, element: Element, enabled: bool) {
        if element == Element::Submit {
            self.submit_enabled = enabled;
        }
    }

    fn render_card(&mut self, card: &CreatureCard) {
        self.card = Some(card.clone());
    }

    fn clear_card(&mut self) {
        self.card = None;
    }
}
