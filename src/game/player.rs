/// Seat identity of a player. Two players are the same only if they hold the
/// same seat; display names live in [`Roster`] and may even coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

/// Display names of the two players in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: [String; 2],
}

impl Roster {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Roster {
            names: [first.into(), second.into()],
        }
    }

    pub fn name(&self, player: Player) -> &str {
        &self.names[player.index()]
    }

    /// Resolve a name to a player. When both carry the name, the first seat wins.
    pub fn by_name(&self, name: &str) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.name(p) == name)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new("A", "B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::First.other(), Player::Second);
        assert_eq!(Player::Second.other(), Player::First);
    }

    #[test]
    fn test_roster_names() {
        let roster = Roster::new("Jim", "Joe");
        assert_eq!(roster.name(Player::First), "Jim");
        assert_eq!(roster.name(Player::Second), "Joe");
        assert_eq!(roster.by_name("Joe"), Some(Player::Second));
        assert_eq!(roster.by_name("Jack"), None);
    }

    #[test]
    fn test_shared_name_keeps_identities_apart() {
        let roster = Roster::new("Sam", "Sam");
        assert_ne!(Player::First, Player::Second);
        assert_eq!(roster.name(Player::First), roster.name(Player::Second));
        assert_eq!(roster.by_name("Sam"), Some(Player::First));
    }
}
