use std::fmt::Write;

use crate::services::activity_board_service::{ActivityCardView, BoardMessage, BoardPage};

pub fn render_message(message: &BoardMessage) -> String {
    format!("[{}] {}", message.kind.as_str(), message.text)
}

pub fn render_card(card: &ActivityCardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.name);
    let _ = writeln!(out, "  {}", card.description);
    let _ = writeln!(out, "  Horário: {}", card.schedule);
    let _ = writeln!(out, "  Disponibilidade: {} vagas restantes", card.spots_left);
    let _ = writeln!(
        out,
        "  📋 Participantes ({}/{})",
        card.participants_count, card.max_participants
    );
    if card.has_participants() {
        for email in &card.participants {
            let _ = writeln!(out, "    - {}", email);
        }
    } else {
        let _ = writeln!(out, "    Nenhum participante inscrito ainda");
    }
    out
}

/// Plain-text board: the message (if any), then the cards or the load error.
pub fn render_board(page: &BoardPage) -> String {
    let mut out = String::new();
    if let Some(message) = &page.message {
        out.push_str(&render_message(message));
        out.push_str("\n\n");
    }
    if let Some(load_error) = page.load_error {
        out.push_str(load_error);
        out.push('\n');
        return out;
    }
    let cards: Vec<String> = page.cards.iter().map(render_card).collect();
    out.push_str(&cards.join("\n"));
    out
}
