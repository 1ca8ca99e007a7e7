use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "Data",
        &[
            "Annual VIIRS Day/Night Band composites (2012 onwards) from the Earth Observation Group.",
            "Radiance is cloud-masked and averaged per year before it reaches this client.",
        ],
    ),
    (
        "Method",
        &[
            "Sum of lights serves as a proxy for economic activity.",
            "Pixels are split into rural, urban and industrial bands by radiance.",
            "Anomalies are clusters whose brightness jumps well above their historical baseline.",
        ],
    ),
    (
        "Caveats",
        &[
            "Night lights track electrification and urban form, not income directly.",
            "Gas flares, fires and sensor changes can inflate individual years.",
        ],
    ),
];

pub fn render_about(f: &mut Frame<'_>, area: Rect) {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "About Quatsch",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];

    for (title, body) in SECTIONS {
        lines.push(TextLine::from(Span::styled(
            *title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.extend(body.iter().map(|line| TextLine::from(format!("  {line}"))));
        lines.push(TextLine::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" About ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
