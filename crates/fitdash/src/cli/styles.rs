use console::Style;
use once_cell::sync::Lazy;

pub static ID: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static DIM: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());
pub static DONE: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static BAR: Lazy<Style> = Lazy::new(|| Style::new().cyan());
