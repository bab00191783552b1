use crossterm::event::{Event, MouseEvent, MouseEventKind};

use crate::math::Point;

/// Last known pointer position and whether the launch button is held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Option<Point>,
    pub held: bool,
}

impl Pointer {
    pub fn move_to(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn press(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Applies a terminal mouse event. Returns `true` if the event was
    /// consumed, in which case the host must not act on it further.
    ///
    /// `scale` is the number of surface units per canvas cell; rows are
    /// doubled for half-block rendering.
    pub fn handle_event(&mut self, event: &Event, scale: f32) -> bool {
        let Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) = event
        else {
            return false;
        };
        let at = cell_to_surface(*column, *row, scale);

        match kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.move_to(at);
                true
            }
            MouseEventKind::Down(_) => {
                // Terminals only report motion while a button is down unless
                // any-motion tracking is on, so the press carries the aim.
                self.move_to(at);
                self.press();
                true
            }
            MouseEventKind::Up(_) => {
                self.release();
                true
            }
            _ => false,
        }
    }
}

pub fn cell_to_surface(column: u16, row: u16, scale: f32) -> Point {
    Point::new(column as f32 * scale, row as f32 * 2.0 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};
    use pretty_assertions::assert_eq;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn move_updates_position_only() {
        let mut pointer = Pointer::default();
        assert!(pointer.handle_event(&mouse(MouseEventKind::Moved, 10, 5), 1.0));
        assert_eq!(
            pointer,
            Pointer {
                position: Some(Point::new(10.0, 10.0)),
                held: false
            }
        );
    }

    #[test]
    fn press_and_release_toggle_held() {
        let mut pointer = Pointer::default();
        assert!(pointer.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), 2.0));
        assert!(pointer.held);
        assert_eq!(pointer.position, Some(Point::new(6.0, 16.0)));

        assert!(pointer.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 4, 4), 2.0));
        assert!(pointer.held);
        assert_eq!(pointer.position, Some(Point::new(8.0, 16.0)));

        assert!(pointer.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 9, 9), 2.0));
        assert!(!pointer.held);
        // Release keeps the last aim.
        assert_eq!(pointer.position, Some(Point::new(8.0, 16.0)));
    }

    #[test]
    fn any_button_holds_the_pointer() {
        for button in [MouseButton::Right, MouseButton::Middle] {
            let mut pointer = Pointer::default();
            assert!(pointer.handle_event(&mouse(MouseEventKind::Down(button), 3, 3), 1.0));
            assert!(pointer.held, "{button:?} press");
            assert_eq!(pointer.position, Some(Point::new(3.0, 6.0)));

            assert!(pointer.handle_event(&mouse(MouseEventKind::Up(button), 3, 3), 1.0));
            assert!(!pointer.held, "{button:?} release");
        }
    }

    #[test]
    fn other_events_are_not_consumed() {
        let mut pointer = Pointer::default();
        assert!(!pointer.handle_event(&mouse(MouseEventKind::ScrollUp, 1, 1), 1.0));
        assert!(!pointer.handle_event(&mouse(MouseEventKind::ScrollDown, 1, 1), 1.0));
        assert!(!pointer.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            1.0
        ));
        assert_eq!(pointer, Pointer::default());
    }
}
