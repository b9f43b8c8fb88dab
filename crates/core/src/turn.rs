//! Two-player turn order.

use crate::Player;

/// Rotating turn order over exactly two players.
///
/// Modelled as a two-slot ring buffer: [`TurnOrder::next`] hands out the
/// player at the front and moves the front pointer, so calls alternate
/// strictly between the two slots.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TurnOrder {
    players: [Player; 2],
    front: usize,
}

impl TurnOrder {
    /// Create a turn order where `first` moves before `second`.
    pub fn new(first: Player, second: Player) -> Self {
        Self {
            players: [first, second],
            front: 0,
        }
    }

    /// Create a turn order starting with `player`, alternating with the opponent.
    pub fn starting_with(player: Player) -> Self {
        Self::new(player, player.opposite())
    }

    /// Player whose turn it is, without rotating.
    pub fn peek(&self) -> Player {
        self.players[self.front]
    }

    /// Return the player at the front and rotate them to the back.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Player {
        let player = self.players[self.front];
        self.front = 1 - self.front;
        player
    }
}

impl Default for TurnOrder {
    fn default() -> Self {
        Self::starting_with(Player::X)
    }
}
