use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{category_totals, Category};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.records.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No records yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <date> <amount> <income|expense> <title>",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Records (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Title", "Category", "Amount", ""]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .skip(app.record_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, rec)| {
            let amount_style = theme::category_style(rec.category);
            let sign = if rec.is_expense() { "-" } else { "+" };

            let style = if i == app.record_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", rec.date)),
                Cell::from(truncate(&rec.title, 30)),
                Cell::from(rec.category.to_string()),
                Cell::from(Span::styled(format!("{sign}{}", rec.amount), amount_style)),
                Cell::from(if rec.photo.is_some() { "photo" } else { "" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(6),
    ];

    let (income, expense) = category_totals(&app.records);
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Records ({}) ", app.records.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(vec![
                Span::styled(" In ", theme::dim_style()),
                Span::styled(format_amount(income), theme::category_style(Category::Income)),
                Span::styled("  Out ", theme::dim_style()),
                Span::styled(format_amount(expense), theme::category_style(Category::Expense)),
                Span::raw(" "),
            ])),
    );

    f.render_widget(table, area);
}
