use crate::domain::CreatureCard;

/// The on-screen pieces the application knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Input,
    Submit,
    Loading,
    Error,
    Results,
}

/// The narrow contract between application state and whatever draws it.
///
/// The application never reaches into a concrete UI; it pushes its state
/// through these calls and the front-end decides how that looks.
pub trait DisplaySurface {
    fn set_text(&mut self, element: Element, text: &str);
    fn show(&mut self, element: Element);
    fn hide(&mut self, element: Element);
    fn set_enabled(&mut self, element: Element, enabled: bool);
    fn render_card(&mut self, card: &CreatureCard);
    fn clear_card(&mut self);
}
