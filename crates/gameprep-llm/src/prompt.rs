// Prompt templates for the coaching-staff explainer.
//
// The system prompt carries instructions only. Every question ships its own
// pre-computed data, chosen by the router, so the model never has to do
// arithmetic or recall stats from earlier turns.

use gameprep_baseball::RoutedContext;
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// ---------------------------------------------------------------------------
// System prompt
// ---------------------------------------------------------------------------

/// Static instructions for every explainer call, addressed to the staff of
/// `home_name`.
pub fn system_prompt(home_name: &str) -> String {
    format!(
        "You are the {home} Baseball Game Prep Agent, a baseball analytics assistant built for the {home} coaching staff.\n\
         \n\
         Your job is to give coaches clear, actionable scouting reports and game plans in plain English. \
         Think like a pro scout talking to a coaching staff in the dugout: be direct, specific and practical.\n\
         \n\
         Each message includes pre-computed stats from our charting database. Use ONLY the data provided in each message. \
         Do NOT make up stats. If data for a player or team is not included, say so clearly.\n\
         \n\
         ANALYTICS YOU KNOW HOW TO INTERPRET:\n\
         - Pitch Mix: usage %, avg/max velo, whiff % (swing and miss / total swings)\n\
         - Count Tendencies: what pitchers throw first pitch, ahead, even, behind and with two strikes\n\
         - RHH vs LHH Splits: handedness breakdowns for usage and outcomes\n\
         - wOBA: weighted on-base average (league avg ~.320, good <.300 for pitchers, >.350 for hitters)\n\
         - Attack Zones: Heart, Shadow, Chase, Waste; zone rate is Heart + Shadow\n\
         - \"N/A\" means there was nothing to divide by, not zero\n\
         \n\
         RULES:\n\
         - Always reference actual numbers from the provided data\n\
         - When building a game plan, organize by batter type (RHH vs LHH)\n\
         - Highlight exploitable tendencies\n\
         - Think about count leverage: what does the pitcher do ahead vs behind?\n\
         - Flag small samples (under 30 pitches)\n\
         - For wOBA, explain in plain English what the number means\n\
         \n\
         FORMAT:\n\
         - Use markdown **bold** headers and ## headers\n\
         - Use bullet points for key stats\n\
         - End every game plan with 1-3 \"KEY TAKEAWAYS\" for the lineup card\n\
         - Use markdown tables for stat breakdowns\n\
         - Show RHH/LHH splits side by side",
        home = home_name
    )
}

// ---------------------------------------------------------------------------
// Coach message
// ---------------------------------------------------------------------------

/// The user turn: the question, the context type and the pretty-printed
/// `data` payload of the routed context.
pub fn build_coach_message(
    question: &str,
    context: &RoutedContext,
) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(context)?;
    let data = value.get("data").cloned().unwrap_or(Value::Null);
    let payload = serde_json::to_string_pretty(&data)?;

    let mut msg = format!(
        "Here is the relevant data (context type: {}). Coach's question: \"{}\"",
        context.kind(),
        question
    );
    msg.push_str("\n\n");
    msg.push_str(&payload);
    debug!(kind = context.kind(), bytes = msg.len(), "built coach message");
    Ok(msg)
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// JSON body for a messages-style API call. The system block is marked for
/// ephemeral caching since it is identical across questions.
pub fn build_request_body(model: &str, max_tokens: u32, system: &str, message: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "system": [{
            "type": "text",
            "text": system,
            "cache_control": { "type": "ephemeral" }
        }],
        "messages": [{ "role": "user", "content": message }]
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
