//! Detail overlay for the selected user.

use roster_lib::model::User;

use crate::hit::{HitMap, Target};
use crate::theme;
use crate::ui::{Buffer, Rect, Style};

const WIDTH: u16 = 64;
const HEIGHT: u16 = 12;
const CLOSE: &str = "[ Close ]";

/// Draws the overlay centered in `screen`.
///
/// The whole screen becomes a click target so nothing behind the overlay
/// reacts while it is shown.
pub fn render_detail(buf: &mut Buffer, screen: Rect, user: &User, hits: &mut HitMap) {
    hits.push(screen, Target::DetailBody);

    let area = screen.centered(WIDTH, HEIGHT);
    buf.fill(area, Style::new().fg(theme::TEXT).bg(theme::SURFACE));
    buf.draw_border(area, Style::new().fg(theme::INTERACT));

    let x = area.x + 2;
    let inner = area.width.saturating_sub(4);
    let text = Style::new().fg(theme::TEXT);
    let lines = [
        (user.name.clone(), theme::title()),
        (user.email.clone(), theme::muted()),
        (String::new(), text),
        (format!("Address: {}", user.address.one_line()), text),
        (format!("Phone: {}", user.phone), text),
        (format!("Website: {}", user.website), text),
        (format!("Company: {}", user.company.name), text),
    ];

    for (i, (line, style)) in lines.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y + 1 >= area.bottom() {
            break;
        }
        buf.put_str(x, y, line, inner, *style);
    }

    let button_y = area.bottom().saturating_sub(2);
    let button_x = area.right().saturating_sub(CLOSE.len() as u16 + 2);
    let w = buf.put_str(button_x, button_y, CLOSE, CLOSE.len() as u16, theme::focused());
    hits.push(Rect::new(button_x, button_y, w, 1), Target::CloseDetail);
}
