use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in key order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Start, pause, resume or reset depending on the session status.
    Toggle,
    /// The terminal changed size and the board must be drawn again.
    Redraw,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Directions the snake may take next when heading `current`.
pub fn allowed_directions(current: Direction) -> impl Iterator<Item = Direction> {
    Direction::ALL
        .into_iter()
        .filter(move |next| direction_change_is_valid(current, *next))
}

/// Maps a terminal key event to a game input. Unrecognized keys map to `None`.
#[must_use]
pub fn map_key(event: KeyEvent) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    match event.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(' ') => Some(GameInput::Toggle),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Maps any terminal event to a game input. Resizes force a redraw.
#[must_use]
pub fn map_event(event: Event) -> Option<GameInput> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(..) => Some(GameInput::Redraw),
        _ => None,
    }
}

/// Direction keys pressed since the last tick.
#[derive(Debug, Clone, Default)]
pub struct InputBacklog {
    pressed: Vec<Direction>,
}

impl InputBacklog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one key press.
    pub fn push(&mut self, direction: Direction) {
        self.pressed.push(direction);
    }

    /// Picks the most recent press that is not a reversal of `current`.
    ///
    /// Falls back to `current` when nothing usable was pressed.
    #[must_use]
    pub fn choose(&self, current: Direction) -> Direction {
        self.pressed
            .iter()
            .rev()
            .copied()
            .find(|next| direction_change_is_valid(current, *next))
            .unwrap_or(current)
    }

    /// Drops every buffered press.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use super::{
        Direction, GameInput, InputBacklog, allowed_directions, direction_change_is_valid,
        map_event, map_key,
    };

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_rejected() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn allowed_set_excludes_only_the_opposite() {
        let allowed: Vec<_> = allowed_directions(Direction::Up).collect();
        assert_eq!(
            allowed,
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn backlog_prefers_most_recent_valid_press() {
        let mut backlog = InputBacklog::new();
        backlog.push(Direction::Left);
        backlog.push(Direction::Down);

        // Down reverses Up, so the earlier Left wins.
        assert_eq!(backlog.choose(Direction::Up), Direction::Left);
        assert_eq!(backlog.choose(Direction::Right), Direction::Down);
    }

    #[test]
    fn backlog_keeps_current_direction_when_nothing_usable() {
        let mut backlog = InputBacklog::new();
        assert_eq!(backlog.choose(Direction::Right), Direction::Right);

        backlog.push(Direction::Left);
        assert_eq!(backlog.choose(Direction::Right), Direction::Right);

        backlog.clear();
        assert!(backlog.is_empty());
    }

    #[test]
    fn arrow_and_space_keys_are_mapped() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(key(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(GameInput::Toggle));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn resize_events_request_redraw() {
        assert_eq!(map_event(Event::Resize(80, 24)), Some(GameInput::Redraw));
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
