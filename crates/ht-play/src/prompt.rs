//! Text sent to the narrator.

use ht_narrator::{ExampleStyle, Prompt};
use ht_session::NarrationContext;

/// Standing instructions for the narrator.
pub const SYSTEM_PROMPT: &str = "You are a skilled Dungeon Master for a fantasy tabletop game. \
You create vivid descriptions, NPC dialogue, and dynamic story events. \
Keep responses immersive, concise, and actionable for players.";

/// Longest history line quoted back to the narrator.
const EVENT_EXCERPT: usize = 160;

/// A sample passage in the requested style.
pub fn example_text(style: ExampleStyle) -> &'static str {
    match style {
        ExampleStyle::Shop => {
            "Down a crooked back alley you find a door to a shop called The Funny Bone. \
It smells of brimstone and popcorn. A skeleton in a tacky purple suit rattles to life \
and introduces himself as Morty Smiles, who is not sure why he is alive but knows he is \
meant to make people laugh. He sells a cushion that screams when sat on and a set of \
wind-up chattering teeth that clamp onto unwary feet, and he laughs so hard at his own \
jokes that his jaw falls off."
        }
        ExampleStyle::Food => {
            "Following the smell of warm sugar and cinnamon you reach a storefront barely six \
feet wide, wedged between two taller buildings. The sign shows a loaf of bread tucked into \
a beetle shell: Snug as a Bug. Behind a flour-dusted counter, Grub the gnome beams at you \
over round spectacles. His Snugleberry Pie calms anyone who eats it, and his confessional \
cupcakes make you blurt out whatever secret weighs on your mind."
        }
        ExampleStyle::Merchant => {
            "Under a bridge in the stone city of Greyhaven, a ramshackle boat of driftwood and \
salvaged crates hangs from the arches. A sign reads 'Trashure Trove'. Inside, by the light \
of glowing fungi, Nibbles, half man and half rat, twitches his whiskers and shows off river \
stones with odd magical properties, a waterlogged journal from a wrecked merchant ship, and \
a barnacle-crusted lockbox from some far-off coast whose contents even he cannot explain."
        }
    }
}

/// The system prompt, with a style example appended when one is chosen.
pub fn system_prompt(example: Option<ExampleStyle>) -> String {
    match example {
        Some(style) => format!(
            "{SYSTEM_PROMPT}\n\nExample ({style}):\n{}",
            example_text(style)
        ),
        None => SYSTEM_PROMPT.to_string(),
    }
}

/// Prompt that opens a new adventure.
pub fn opening_prompt(ctx: &NarrationContext) -> String {
    format!(
        "You are the dungeon master for a fifth-edition fantasy campaign.

CHARACTER: {}, Level {} {} {}
LOCATION: {}

INSTRUCTIONS:
- Create an engaging fantasy adventure
- Present the scene and offer 2-3 actions
- When an action needs dice, say \"Please roll the [dice] for [action]\"
- I will handle all dice rolling and calculations
- Only narrate outcomes from the roll results I give you
- Keep responses under 150 words
- End with \"What will you do?\"

Start the adventure now.",
        ctx.character_name, ctx.level, ctx.race, ctx.class, ctx.location
    )
}

/// Prompt for a player action.
pub fn action_prompt(ctx: &NarrationContext, action: &str) -> String {
    let mut out = format!(
        "The player wants to: {action}

Character: {} (Level {} {} {})
Current HP: {}
Location: {}
",
        ctx.character_name, ctx.level, ctx.race, ctx.class, ctx.hp, ctx.location
    );
    if !ctx.active_quests.is_empty() {
        out.push_str(&format!("Active quests: {}\n", ctx.active_quests.join("; ")));
    }
    if !ctx.recent_events.is_empty() {
        out.push_str("Recent events:\n");
        for event in &ctx.recent_events {
            out.push_str(&format!("- {}\n", excerpt(&event.description)));
        }
    }
    out.push_str(
        "
Respond as the DM. If this action needs a dice roll, ask for it and name the dice.
Otherwise, narrate what happens and present new choices.
End with \"What will you do?\"",
    );
    out
}

/// Prompt that reports a roll back to the narrator.
pub fn roll_outcome_prompt(action: &str, notation: &str, total: i32) -> String {
    format!(
        "The player attempted: {action}
They rolled {notation} and got: {total}

Narrate the outcome based on the roll result.
Then present new options and end with \"What will you do?\""
    )
}

/// Pair a turn with the system prompt.
pub fn compose(system: &str, user: String) -> Prompt {
    Prompt::new(system, user)
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EVENT_EXCERPT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
