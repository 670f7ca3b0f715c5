//! Names and files of the templates the dance script needs

use super::types::Arrow;
use crate::error::BotResult;
use crate::template_matching::TemplateLibrary;
use std::path::Path;

pub const WIZARD_CITY: &str = "wizard_city";
pub const PLAY: &str = "play";
pub const NEXT: &str = "next";
pub const FEED_PET: &str = "feed_pet";
pub const PLAY_AGAIN: &str = "play_again";
pub const FINISH: &str = "finish";
pub const DANCE_GAME: &str = "dance_game";
/// Close button of the level-up popup
pub const ECKS: &str = "ecks";

/// Every `(template name, file name)` pair; all of them must exist
pub const RESOURCE_FILES: [(&str, &str); 12] = [
    ("up", "arrow_up.png"),
    ("down", "arrow_down.png"),
    ("left", "arrow_left.png"),
    ("right", "arrow_right.png"),
    (WIZARD_CITY, "wizard_city.png"),
    (PLAY, "play.png"),
    (NEXT, "next.png"),
    (FEED_PET, "feed_pet.png"),
    (PLAY_AGAIN, "play_again.png"),
    (FINISH, "finish.png"),
    (DANCE_GAME, "dance_game.png"),
    (ECKS, "ecks.png"),
];

/// Arrow template names in prompt match order
pub fn arrow_names() -> Vec<&'static str> {
    Arrow::ALL.iter().map(|a| a.name()).collect()
}

pub fn load_dance_templates(directory: &Path) -> BotResult<TemplateLibrary> {
    let library = TemplateLibrary::load_from_directory(directory, &RESOURCE_FILES)?;
    log::info!(
        "✅ Loaded {} templates from {}",
        library.count(),
        directory.display()
    );
    Ok(library)
}
