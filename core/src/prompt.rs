//! Prompt construction for player analyses

use crate::types::{PlayerGame, PlayerName};

const ROLE_LINE: &str = "You are an expert NBA analyst.";
const TASK_LINE: &str =
    "Analyze the following recent game stats and summarize the player's performance clearly and concisely.";

/// Build the analysis prompt for `player` from their recent games
///
/// The output is a pure function of its inputs. Games are embedded as
/// pretty-printed JSON in upstream order.
pub fn build_analysis_prompt(player: &PlayerName, games: &[PlayerGame]) -> Result<String, serde_json::Error> {
    let stats = serde_json::to_string_pretty(games)?;
    Ok(format!(
        "{ROLE_LINE}\n{TASK_LINE}\n\nPlayer: {player}\nStats:\n{stats}\n"
    ))
}
