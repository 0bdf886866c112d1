use std::io::{self, Write};
use tapsweep_core::{Cell, GameEngine, GameState, MinePlacer, PlayerStats};

fn cell_char(cell: Cell) -> char {
    if cell.is_revealed() {
        match (cell.is_mine(), cell.adjacent_mines()) {
            (true, _) => '*',
            (false, 0) => '.',
            (false, n) => char::from(b'0' + n),
        }
    } else if cell.is_flagged() {
        'F'
    } else if cell.is_suspected() {
        '?'
    } else {
        '#'
    }
}

pub(crate) fn status_line<P: MinePlacer>(engine: &GameEngine<P>, elapsed_secs: u32) -> String {
    let mut line = format!(
        "mines {:>3}  progress {:>3}%  time {:>4}s",
        engine.mines_left(),
        (engine.progress() * 100.0) as u32,
        elapsed_secs
    );
    if engine.is_marking_mode() {
        line.push_str(&format!("  [marking: {} suspected]", engine.suspected_count()));
    }
    match engine.state() {
        GameState::Won => line.push_str("  -- you won! any move starts a new game"),
        GameState::Lost => line.push_str("  -- boom. any move starts a new game"),
        GameState::NotStarted | GameState::InProgress => {}
    }
    line
}

pub(crate) fn board<P: MinePlacer>(
    out: &mut impl Write,
    engine: &GameEngine<P>,
    elapsed_secs: u32,
) -> io::Result<()> {
    let (rows, cols) = engine.config().size();

    writeln!(out, "{}", status_line(engine, elapsed_secs))?;
    write!(out, "    ")?;
    for col in 0..cols {
        write!(out, "{}", col % 10)?;
    }
    writeln!(out)?;

    for row in 0..rows {
        write!(out, "{row:>3} ")?;
        for col in 0..cols {
            write!(out, "{}", cell_char(engine.grid()[(row, col)]))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn stats(out: &mut impl Write, stats: &PlayerStats) -> io::Result<()> {
    writeln!(
        out,
        "played {}  won {}  win rate {:.0}%",
        stats.games_played,
        stats.games_won,
        stats.win_rate * 100.0
    )?;
    match (stats.best_time, stats.average_time) {
        (Some(best), Some(average)) => {
            writeln!(out, "best {best}s  average {average:.1}s")
        }
        _ => writeln!(out, "no wins yet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapsweep_core::{FixedMinePlacer, GameConfig, GameMode, RevealOutcome};

    fn engine() -> GameEngine<FixedMinePlacer> {
        let config = GameConfig::new(3, 4, 1).unwrap();
        let placer = FixedMinePlacer::new(config, &[(0, 3)]).unwrap();
        GameEngine::new(config, GameMode::Classic, placer)
    }

    fn render(engine: &GameEngine<FixedMinePlacer>) -> String {
        let mut out = Vec::new();
        board(&mut out, engine, 7).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_hidden_board() {
        let text = render(&engine());

        assert_eq!(
            text,
            "mines   1  progress   0%  time    7s\n    0123\n  0 ####\n  1 ####\n  2 ####\n"
        );
    }

    #[test]
    fn renders_cells_and_annotations() {
        let mut engine = engine();
        engine.toggle_flag((2, 3));
        engine.reveal((2, 0), 0);
        engine.set_marking_mode(true);
        engine.toggle_mark((0, 3));

        let text = render(&engine);
        let rows: Vec<&str> = text.lines().skip(2).collect();

        assert_eq!(rows, ["  0 ..1?", "  1 ..11", "  2 ...F"]);
        assert!(text.lines().next().unwrap().contains("[marking: 1 suspected]"));
    }

    #[test]
    fn status_reports_loss() {
        let mut engine = engine();
        assert_eq!(engine.reveal((1, 2), 0), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((0, 3), 0), RevealOutcome::HitMine);

        assert!(status_line(&engine, 0).contains("boom"));
        assert!(render(&engine).contains('*'));
    }
}
