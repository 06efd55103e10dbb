//! User interface rendering functions for all application screens.

use std::{ops::Range, rc::Rc, time::Duration};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::DOT,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    game::{CellView, GameSession, Phase},
    maze::Position,
    questions::Question,
    timer::format_elapsed,
    types::{ConfirmItem, MenuType, Screen, TitleItem},
    App,
};

/// Terminal columns used to draw one maze cell, so cells come out roughly square.
const CELL_WIDTH: usize = 2;

/// Key hint drawn in the bottom border of every menu.
const MENU_HINT: &str = "(j) down / (k) up / (l) select";

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors if the maze does not fit the terminal's coordinate range.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::Title(item) => title_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
        Screen::ConfirmQuit(item) => {
            in_game(app, frame)?;
            confirm_quit(frame, item);
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Returns a rectangle of at most `width` by `height` cells centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    centered
}

/// Renders the generic layout structure for the title and quit confirmation menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let title = menu.repr();
    let width = u16::try_from(title.len().max(MENU_HINT.len()))
        .map_or(u16::MAX, |len| len.saturating_add(4));
    let layout = centered(frame.area(), width, u16::from(menu.value()) + 2);

    let block = Block::bordered()
        .title(title)
        .title_bottom(MENU_HINT)
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders the items of a menu, highlighting the active one.
fn render_menu_items(frame: &mut Frame, areas: &[Rect], items: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (area, (label, active)) in areas.iter().zip(items) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(*label, style).centered(), *area);
    }
}

/// Renders the title menu with the "Start Game" and "Quit" options.
pub(crate) fn title_menu(frame: &mut Frame, item: TitleItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::Title(2));
    render_menu_items(
        frame,
        &inner_layout,
        &[
            ("Start Game", item == TitleItem::StartGame),
            ("Quit", item == TitleItem::Quit),
        ],
    );
}

/// Renders the quit confirmation popup over the maze.
pub(crate) fn confirm_quit(frame: &mut Frame, item: ConfirmItem) {
    let inner_layout = init_menu(frame, MenuType::ConfirmQuit(2));
    render_menu_items(
        frame,
        &inner_layout,
        &[
            ("Keep Playing", item == ConfirmItem::Resume),
            ("Quit", item == ConfirmItem::Quit),
        ],
    );
}

/// Builds the span drawn for a single maze cell.
///
/// Cells outside the player's view are fog. Inside it, the player wins over everything, then the
/// exit once it is unlocked, then walls and open floor.
fn cell_span(view: CellView) -> Span<'static> {
    let fog = Style::default().bg(Color::DarkGray);
    let (text, style) = if !view.visible {
        ("  ".to_owned(), fog)
    } else if view.player {
        (
            format!("{DOT} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if view.exit && view.exit_unlocked {
        ("* ".to_owned(), Style::default().fg(Color::White).bg(Color::Red))
    } else if view.wall {
        ("  ".to_owned(), Style::default().bg(Color::Blue))
    } else {
        ("  ".to_owned(), Style::default().bg(Color::Black))
    };

    Span::styled(text, style)
}

/// Returns the slice of `len` cells shown in a window `span` cells wide.
///
/// The whole range fits when it can. Otherwise the window is centred on `focus` and pushed back
/// inside `0..len` near either edge.
fn visible_range(len: usize, span: usize, focus: usize) -> Range<usize> {
    if len <= span {
        return 0..len;
    }
    let offset = focus.saturating_sub(span / 2).min(len - span);

    offset..offset + span
}

/// Builds one line of spans per maze row in `rows`, limited to the columns in `cols`.
fn maze_lines(
    session: &GameSession,
    rows: Range<usize>,
    cols: &Range<usize>,
) -> Vec<Line<'static>> {
    rows.map(|row| {
        Line::from(
            cols.clone()
                .filter_map(|col| session.cell_view(Position::new(row, col)))
                .map(cell_span)
                .collect::<Vec<_>>(),
        )
    })
    .collect()
}

/// Returns the line telling the player what to do next.
fn hint_line(session: &GameSession) -> Line<'static> {
    let (_, required) = session.progress();
    let text = if session.is_exit_unlocked() {
        "Exit unlocked! Find the red star to escape!".to_owned()
    } else {
        format!("Find all {required} hidden checkpoints to unlock the exit!")
    };

    Line::styled(text, Style::default().fg(Color::Green)).centered()
}

/// Renders the in-game screen with the maze, heads-up display and any open popup.
///
/// # Errors
///
/// This function returns an error if the maze dimensions do not fit in terminal coordinates.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app.game.session();
    let maze = session.maze();
    let (collected, required) = session.progress();

    let [hud_area, maze_content_area, hint_area, status_area, tooltip_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let hud = Line::styled(
        format!(
            "Time: {}   Checkpoints: {collected}/{required}",
            format_elapsed(app.ticker.displayed())
        ),
        Style::default().fg(Color::Green),
    )
    .centered();
    frame.render_widget(hud, hud_area);

    // Mazes taller or wider than the terminal scroll with the player.
    let player = session.player();
    let rows = visible_range(
        maze.rows(),
        usize::from(maze_content_area.height),
        player.row,
    );
    let cols = visible_range(
        maze.cols(),
        usize::from(maze_content_area.width) / CELL_WIDTH,
        player.col,
    );
    let maze_area = centered(
        maze_content_area,
        u16::try_from(cols.len() * CELL_WIDTH)?,
        u16::try_from(rows.len())?,
    );
    frame.render_widget(Paragraph::new(maze_lines(session, rows, &cols)), maze_area);

    frame.render_widget(hint_line(session), hint_area);

    if let Some(status) = &app.status {
        frame.render_widget(
            Line::styled(status.to_string(), Style::default().fg(Color::Yellow)).centered(),
            status_area,
        );
    }

    let keys = match session.phase() {
        Phase::AnsweringQuestion { .. } => "(j/k or 1-9) choose / (enter) submit / (q) quit",
        Phase::Completed { .. } => "(enter) submit / (esc) quit",
        Phase::NotStarted | Phase::Playing => "(arrows or h/j/k/l) move / (q) quit",
    };
    let tooltip_block = Block::bordered()
        .title(keys)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    frame.render_widget(tooltip_block, tooltip_area);

    match session.phase() {
        Phase::AnsweringQuestion { selected, .. } => {
            let question = session
                .current_question()
                .ok_or_eyre("failed to retrieve the open question")?;
            question_popup(frame, question, selected);
        }
        Phase::Completed { elapsed } => completion_popup(app, frame, elapsed),
        Phase::NotStarted | Phase::Playing => {}
    }

    Ok(())
}

/// Renders the checkpoint question popup.
fn question_popup(frame: &mut Frame, question: &Question, selected: Option<usize>) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let mut lines = vec![
        Line::styled(question.prompt, content_style.add_modifier(Modifier::BOLD)),
        Line::default(),
    ];
    for (index, option) in question.options.iter().enumerate() {
        let style = if selected == Some(index) {
            active_content_style
        } else {
            content_style
        };
        lines.push(Line::styled(format!("{}. {option}", index + 1), style));
    }

    let area = frame.area();
    let width = area.width.saturating_mul(3) / 5;
    let height = u16::try_from(question.options.len())
        .map_or(u16::MAX, |options| options.saturating_add(8));
    let popup = centered(area, width, height);

    let block = Block::bordered()
        .title("Checkpoint reached!")
        .title_alignment(Alignment::Center)
        .style(content_style)
        .border_type(BorderType::Rounded);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

/// Renders the completion popup with the final time and the admin password prompt.
fn completion_popup(app: &App, frame: &mut Frame, elapsed: Duration) {
    let content_style = Style::default().fg(Color::Green);
    let (collected, required) = app.game.session().progress();

    let mut lines = vec![
        Line::styled(format!("Time Taken: {}", format_elapsed(elapsed)), content_style),
        Line::styled(
            format!("Checkpoints Collected: {collected}/{required}"),
            content_style,
        ),
        Line::default(),
    ];
    if app.admin.is_some() {
        lines.push(Line::styled(
            "Admin unlocked. Press (enter) to play a new maze.",
            content_style,
        ));
    } else {
        lines.push(Line::styled("Enter admin password to reset:", content_style));
        lines.push(Line::styled(
            format!("> {}", "*".repeat(app.password.chars().count())),
            Style::default().fg(Color::White),
        ));
    }

    let area = frame.area();
    let popup = centered(area, area.width.saturating_mul(3) / 5, 8);

    let block = Block::bordered()
        .title("Maze Completed!")
        .title_alignment(Alignment::Center)
        .style(content_style)
        .border_type(BorderType::Rounded);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}
