use crate::flow::NavAction;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// A clickable region that fires its action on press-then-release inside it.
#[derive(Clone, Debug)]
pub struct Button {
    label: String,
    area: Rect,
    action: NavAction,
    hovered: bool,
    pressed: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, action: NavAction) -> Self {
        Self {
            label: label.into(),
            area: Rect::default(),
            action,
            hovered: false,
            pressed: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Placed by the renderer each frame.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    #[must_use]
    pub fn action(&self) -> NavAction {
        self.action
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Option<NavAction> {
        let inside = self.contains(event.column, event.row);
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.hovered = inside;
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = inside;
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let fired = self.pressed && inside;
                self.pressed = false;
                fired.then_some(self.action)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn placed() -> Button {
        let mut button = Button::new("Start Game", NavAction::Start);
        button.set_area(Rect::new(10, 5, 20, 3));
        button
    }

    #[test]
    fn test_click_inside_fires() {
        let mut button = placed();
        assert_eq!(button.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 12, 6)), None);
        assert!(button.is_pressed());
        assert_eq!(
            button.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 29, 7)),
            Some(NavAction::Start)
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut button = placed();
        button.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 12, 6));
        assert_eq!(
            button.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 30, 6)),
            None
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut button = placed();
        button.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(
            button.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 6)),
            None
        );
    }

    #[test]
    fn test_hover_tracks_movement() {
        let mut button = placed();
        button.handle_mouse(&mouse(MouseEventKind::Moved, 15, 5));
        assert!(button.is_hovered());
        button.handle_mouse(&mouse(MouseEventKind::Moved, 15, 8));
        assert!(!button.is_hovered());
    }

    #[test]
    fn test_right_click_ignored() {
        let mut button = placed();
        button.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 12, 6));
        assert!(!button.is_pressed());
        assert_eq!(
            button.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Right), 12, 6)),
            None
        );
    }
}
