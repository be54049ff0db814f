use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

/// Menu entries shown above the canvas.
pub const MENU_ITEMS: &[&str] = &[
    "[Space][click barn] toggle",
    "[t] set time",
    "[s] system time",
    "[1-5] presets",
    "[q][Esc] quit",
    "[F11] full",
];

/// Draw the menu bar on row 0.
pub fn render_menubar<W: Write>(out: &mut W, items: &[&str]) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        for (text, key) in split_keys(item) {
            let attr = if key {
                style::Attribute::Bold
            } else {
                style::Attribute::Dim
            };
            queue!(
                out,
                style::SetAttribute(attr),
                style::Print(text),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Split a menu item into runs, flagging the `[...]` key hints.
/// An unclosed bracket runs to the end as plain text.
fn split_keys(item: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            runs.push((rest, false));
            break;
        };
        if open > 0 {
            runs.push((&rest[..open], false));
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                runs.push((&rest[..=close], true));
                rest = &rest[close + 1..];
            }
            None => {
                runs.push((rest, false));
                break;
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_key_hints() {
        assert_eq!(
            split_keys("[q][Esc] quit"),
            vec![("[q]", true), ("[Esc]", true), (" quit", false)]
        );
        assert_eq!(split_keys("press [t"), vec![("press ", false), ("[t", false)]);
        assert!(split_keys("").is_empty());
    }

    #[test]
    fn renders_into_any_writer() {
        let mut buf = Vec::new();
        render_menubar(&mut buf, &["[t] set time"]).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("[t]"));
        assert!(text.contains(" set time"));
    }
}
