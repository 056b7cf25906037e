use crate::controller::GameEvent;

/// UI state that lives outside the game: the score display and the game-over panel.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Chrome {
    score: u32,
    game_over: Option<u32>,
}

impl Chrome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the displayed values from one controller signal.
    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::GameOver { final_score } => {
                self.score = final_score;
                self.game_over = Some(final_score);
            }
            GameEvent::Reset => self.game_over = None,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Final score shown by the game-over panel, when the panel is visible.
    #[must_use]
    pub fn game_over_panel(&self) -> Option<u32> {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::Chrome;
    use crate::controller::GameEvent;

    #[test]
    fn score_changes_update_the_display() {
        let mut chrome = Chrome::new();

        chrome.apply(GameEvent::ScoreChanged(4));

        assert_eq!(chrome.score(), 4);
        assert_eq!(chrome.game_over_panel(), None);
    }

    #[test]
    fn game_over_shows_the_panel_until_reset() {
        let mut chrome = Chrome::new();

        chrome.apply(GameEvent::GameOver { final_score: 12 });
        assert_eq!(chrome.game_over_panel(), Some(12));

        chrome.apply(GameEvent::Reset);
        chrome.apply(GameEvent::ScoreChanged(0));
        assert_eq!(chrome.game_over_panel(), None);
        assert_eq!(chrome.score(), 0);
    }
}
