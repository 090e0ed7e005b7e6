//! Output formatting for the CLI


use crate::{
    maze::Maze,
    race::Snapshot,
    types::{Action, Position},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Draw one frame as text.
///
/// `P` player, `A` agent, `B` both, `G` goal, `#` wall, `.` path and a blank
/// for cells hidden in blackout mode. With a row-major `policy`, open cells
/// show the greedy action arrow instead of `.`.
pub fn render_maze(maze: &Maze, snapshot: &Snapshot, policy: Option<&[Action]>) -> String {
    let size = maze.size();
    let mut out = String::with_capacity(size * (size + 1));
    for y in 0..size {
        for x in 0..size {
            let cell = Position::new(x, y);
            let glyph = if !snapshot.is_visible(cell) {
                ' '
            } else if cell == snapshot.player && cell == snapshot.agent {
                'B'
            } else if cell == snapshot.player {
                'P'
            } else if cell == snapshot.agent {
                'A'
            } else if cell == snapshot.goal {
                'G'
            } else if maze.is_wall(cell) {
                '#'
            } else {
                policy
                    .and_then(|policy| policy.get(y * size + x))
                    .map_or('.', |action| action.arrow())
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
