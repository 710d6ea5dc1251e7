use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::models::Category;
use crate::report::{ReportView, YearlyReport};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::compact_amount;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {} Income vs Expense ", app.report.year()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    match &app.report {
        ReportView::NoData { year } => {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No data for year {year}"),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "H/L to switch year, :add to record something",
                    theme::dim_style(),
                )),
            ])
            .centered()
            .block(block);
            f.render_widget(msg, area);
        }
        ReportView::Chart(report) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(6)])
                .split(block.inner(area));
            f.render_widget(block, area);
            render_legend(f, chunks[0], report);
            render_bars(f, chunks[1], report);
        }
    }
}

fn render_legend(f: &mut Frame, area: Rect, report: &YearlyReport) {
    let legend = Paragraph::new(Line::from(vec![
        Span::styled(" ■ Income ", theme::category_style(Category::Income)),
        Span::styled(
            format!("{:.2}", report.total(Category::Income)),
            theme::normal_style(),
        ),
        Span::styled("   ■ Expense ", theme::category_style(Category::Expense)),
        Span::styled(
            format!("{:.2}", report.total(Category::Expense)),
            theme::normal_style(),
        ),
        Span::styled(
            format!("   axis max {:.0}", report.axis_max()),
            theme::dim_style(),
        ),
    ]));
    f.render_widget(legend, area);
}

fn render_bars(f: &mut Frame, area: Rect, report: &YearlyReport) {
    let mut chart = BarChart::default()
        .bar_width(4)
        .bar_gap(0)
        .group_gap(2)
        .max(report.axis_max().ceil() as u64)
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        );

    for (month, label) in MONTH_LABELS.iter().enumerate() {
        // Months without a value get no bar at all.
        let bars: Vec<Bar> = Category::all()
            .iter()
            .filter_map(|&category| {
                report.value_at(category, month).map(|value| {
                    Bar::default()
                        .value(value.round() as u64)
                        .text_value(compact_amount(value))
                        .style(theme::category_style(category))
                })
            })
            .collect();

        chart = chart.data(
            BarGroup::default()
                .label(Line::from(*label))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
