use crate::model::Upcoming;

/// Message de célébration pour un anniversaire du jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoutout {
    pub name: String,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, Markdown, chat, etc.).
pub trait ShoutoutRenderer {
    fn render(&self, entry: &Upcoming) -> String;
}

/// Rendu texte simple : `Ada turns 210! — Pioneer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextShoutout;

impl ShoutoutRenderer for TextShoutout {
    fn render(&self, entry: &Upcoming) -> String {
        let mut content = match entry.occurrence.turning_age {
            Some(age) => format!("{} turns {age}!", entry.record.name),
            None => format!("{} 🎉", entry.record.name),
        };
        if !entry.record.notes.is_empty() {
            content.push_str("  —  ");
            content.push_str(&entry.record.notes);
        }
        content
    }
}

/// Messages pour tous les anniversaires du jour, dans l'ordre reçu.
pub fn todays_shoutouts(entries: &[Upcoming], renderer: &dyn ShoutoutRenderer) -> Vec<Shoutout> {
    entries
        .iter()
        .filter(|e| e.occurrence.is_today)
        .map(|e| Shoutout {
            name: e.record.name.clone(),
            content: renderer.render(e),
        })
        .collect()
}
