//! The user table: Name, Email, Company.

use roster_lib::model::User;

use crate::hit::{HitMap, Target};
use crate::theme;
use crate::ui::text::fit;
use crate::ui::{Buffer, Rect, Style};

/// Column widths for a given table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name: u16,
    pub email: u16,
    pub company: u16,
}

impl TableLayout {
    const GAP: u16 = 2;

    /// Splits `width` roughly 30/40/30 after the gaps between columns.
    pub fn for_width(width: u16) -> Self {
        let usable = width.saturating_sub(Self::GAP * 2);
        let name = usable * 3 / 10;
        let email = usable * 4 / 10;
        let company = usable - name - email;
        Self {
            name,
            email,
            company,
        }
    }

    fn columns(&self) -> [(u16, u16); 3] {
        let email_x = self.name + Self::GAP;
        let company_x = email_x + self.email + Self::GAP;
        [(0, self.name), (email_x, self.email), (company_x, self.company)]
    }
}

/// Draws the header and `rows` into `area`.
///
/// `cursor` is the highlighted row on this page, if the table has focus.
pub fn render_user_table(
    buf: &mut Buffer,
    area: Rect,
    rows: &[&User],
    cursor: Option<usize>,
    empty_message: &str,
    hits: &mut HitMap,
) {
    if area.height == 0 {
        return;
    }
    let layout = TableLayout::for_width(area.width);
    let header = Style::new().fg(theme::PRIMARY).bold().underline();

    for ((offset, width), title) in layout.columns().into_iter().zip(["Name", "Email", "Company"]) {
        buf.put_str(area.x + offset, area.y, title, width, header);
    }

    if rows.is_empty() {
        buf.put_str(area.x, area.y + 1, empty_message, area.width, theme::muted().italic());
        return;
    }

    for (index, user) in rows.iter().enumerate() {
        let y = area.y + 1 + index as u16;
        if y >= area.bottom() {
            break;
        }
        let line = Rect::new(area.x, y, area.width, 1);
        let style = if cursor == Some(index) {
            Style::new().fg(theme::TEXT).bg(theme::SELECTION).bold()
        } else {
            Style::new().fg(theme::TEXT)
        };
        if cursor == Some(index) {
            buf.fill(line, style);
        }

        let cells = [user.name.as_str(), user.email.as_str(), user.company.name.as_str()];
        for ((offset, width), text) in layout.columns().into_iter().zip(cells) {
            buf.put_str(area.x + offset, y, &fit(text, width as usize), width, style);
        }
        hits.push(line, Target::Row { id: user.id, index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_lib::model::{Address, Company};

    fn user(id: u64, name: &str, email: &str, company: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: String::new(),
            email: email.to_string(),
            address: Address::default(),
            phone: String::new(),
            website: String::new(),
            company: Company {
                name: company.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_layout_fills_width() {
        let layout = TableLayout::for_width(104);
        assert_eq!(layout.name + layout.email + layout.company + 4, 104);
        assert_eq!(layout.name, 30);
        assert_eq!(layout.email, 40);
    }

    #[test]
    fn test_renders_header_and_rows() {
        let a = user(1, "Leanne Graham", "Sincere@april.biz", "Romaguera-Crona");
        let b = user(2, "Ervin Howell", "Shanna@melissa.tv", "Deckow-Crist");
        let mut buf = Buffer::new(104, 4);
        let mut hits = HitMap::new();

        render_user_table(&mut buf, Rect::new(0, 0, 104, 4), &[&a, &b], Some(1), "", &mut hits);

        assert!(buf.row_text(0).starts_with("Name"));
        assert_eq!(&buf.row_text(0)[32..37], "Email");
        assert!(buf.row_text(1).starts_with("Leanne Graham"));
        assert!(buf.row_text(2).contains("Shanna@melissa.tv"));
        assert!(buf.row_text(2).contains("Deckow-Crist"));
        assert_eq!(hits.hit(50, 2), Some(Target::Row { id: 2, index: 1 }));
        assert_eq!(buf.get(100, 2).unwrap().bg, theme::SELECTION);
    }

    #[test]
    fn test_empty_message() {
        let mut buf = Buffer::new(40, 3);
        let mut hits = HitMap::new();
        render_user_table(&mut buf, Rect::new(0, 0, 40, 3), &[], None, "No users match.", &mut hits);
        assert!(buf.row_text(1).starts_with("No users match."));
        assert_eq!(hits.hit(1, 1), None);
    }
}
