use anyhow::{Context, bail};
use std::str::FromStr;
use tapsweep_core::{Coord, Coord2, PlayerAction, PlayerInput};

pub(crate) const HELP: &str = "\
commands:
  t ROW COL   tap: reveal, or mark while marking mode is on
  l ROW COL   long press: flag
  r ROW COL   reveal
  f ROW COL   flag
  m ROW COL   suspected mark (marking mode only)
  mode        toggle marking mode
  new         start over
  show        print the board
  stats       print finished games summary
  help        this text
  q           quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Tap(Coord2),
    Hold(Coord2),
    Play(PlayerInput),
    ToggleMarkingMode,
    New,
    Show,
    Stats,
    Help,
    Quit,
}

fn parse_coords<'a>(mut words: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let (Some(row), Some(col), None) = (words.next(), words.next(), words.next()) else {
        bail!("expected ROW COL");
    };
    let row: Coord = row.parse().with_context(|| format!("bad row {row:?}"))?;
    let col: Coord = col.parse().with_context(|| format!("bad column {col:?}"))?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Show);
        };

        Ok(match verb {
            "t" | "tap" => Tap(parse_coords(words)?),
            "l" | "hold" => Hold(parse_coords(words)?),
            "r" | "reveal" => Play(PlayerInput::new(parse_coords(words)?, PlayerAction::Reveal)),
            "f" | "flag" => Play(PlayerInput::new(parse_coords(words)?, PlayerAction::Flag)),
            "m" | "mark" => Play(PlayerInput::new(parse_coords(words)?, PlayerAction::Mark)),
            "mode" => ToggleMarkingMode,
            "new" => New,
            "show" => Show,
            "stats" => Stats,
            "help" | "?" => Help,
            "q" | "quit" | "exit" => Quit,
            other => bail!("unknown command {other:?}, try `help`"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("t 3 4".parse::<Command>().unwrap(), Command::Tap((3, 4)));
        assert_eq!("hold 0 1".parse::<Command>().unwrap(), Command::Hold((0, 1)));
        assert_eq!(
            "  f 2   7 ".parse::<Command>().unwrap(),
            Command::Play(PlayerInput::new((2, 7), PlayerAction::Flag))
        );
        assert_eq!(
            "mark 1 1".parse::<Command>().unwrap(),
            Command::Play(PlayerInput::new((1, 1), PlayerAction::Mark))
        );
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!("mode".parse::<Command>().unwrap(), Command::ToggleMarkingMode);
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("r 1".parse::<Command>().is_err());
        assert!("r 1 2 3".parse::<Command>().is_err());
        assert!("r -1 2".parse::<Command>().is_err());
        assert!("r 1 300".parse::<Command>().is_err());
        assert!("dig 1 2".parse::<Command>().is_err());
    }
}
