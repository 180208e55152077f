//! Parser that consumes the lexer and builds a `PathDocument`.
//
//  path   ::= ( command group* )*
//  command letters and arity (numbers per group):
//
//      M m L l T t   2        C c   6
//      H h V v       1        Q q S s   4
//      A a           7 (two of them single-character flags)
//      Z z           0
//
//  A group without a letter in front repeats the previous command of the
//  same kind; after M/m the repeats are implicit L/l.

use super::ast::{Command, Coord, PathDocument, Subpath};
use super::lexer::{Lexeme, Lexer, Token};
use crate::error::ParseError;

/// Parse one raw `d` string into a document tagged with `id`.
pub fn parse(id: &str, raw: &str) -> Result<PathDocument, ParseError> {
    let subpaths = Parser::new(raw).parse()?;
    Ok(PathDocument {
        id: id.to_string(),
        subpaths,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl Kind {
    fn from_letter(letter: char) -> Option<Kind> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Kind::Move,
            'L' => Kind::Line,
            'H' => Kind::Horizontal,
            'V' => Kind::Vertical,
            'C' => Kind::Cubic,
            'S' => Kind::SmoothCubic,
            'Q' => Kind::Quadratic,
            'T' => Kind::SmoothQuadratic,
            'A' => Kind::Arc,
            'Z' => Kind::Close,
            _ => return None,
        };
        Some(kind)
    }

    fn arity(self) -> usize {
        match self {
            Kind::Close => 0,
            Kind::Horizontal | Kind::Vertical => 1,
            Kind::Move | Kind::Line | Kind::SmoothQuadratic => 2,
            Kind::Quadratic | Kind::SmoothCubic => 4,
            Kind::Cubic => 6,
            Kind::Arc => 7,
        }
    }
}

/// The command currently in effect, used for implicit repetition.
#[derive(Debug, Clone, Copy)]
struct Active {
    kind: Kind,
    letter: char,
    relative: bool,
}

impl Active {
    fn from_letter(letter: char, position: usize) -> Result<Self, ParseError> {
        let kind =
            Kind::from_letter(letter).ok_or(ParseError::UnknownCommand { letter, position })?;
        Ok(Self {
            kind,
            letter,
            relative: letter.is_ascii_lowercase(),
        })
    }

    /// What a bare group following this command means.
    fn repeated(self) -> Self {
        match self.kind {
            Kind::Move => Self {
                kind: Kind::Line,
                letter: if self.relative { 'l' } else { 'L' },
                relative: self.relative,
            },
            _ => self,
        }
    }

    fn is_arc_flag(self, index: usize) -> bool {
        self.kind == Kind::Arc && (index == 3 || index == 4)
    }

    fn build(self, v: &[f64]) -> Command {
        let relative = self.relative;
        let c = |i: usize| Coord::new(v[i], v[i + 1]);
        match self.kind {
            Kind::Move => Command::MoveTo { to: c(0), relative },
            Kind::Line => Command::LineTo { to: c(0), relative },
            Kind::Horizontal => Command::HorizontalLineTo { x: v[0], relative },
            Kind::Vertical => Command::VerticalLineTo { y: v[0], relative },
            Kind::Cubic => Command::CubicBezier {
                p1: c(0),
                p2: c(2),
                p3: c(4),
                relative,
            },
            Kind::SmoothCubic => Command::SmoothCubicBezier {
                p2: c(0),
                p3: c(2),
                relative,
            },
            Kind::Quadratic => Command::QuadraticBezier {
                p1: c(0),
                p2: c(2),
                relative,
            },
            Kind::SmoothQuadratic => Command::SmoothQuadraticBezier { p2: c(0), relative },
            Kind::Arc => Command::EllipticalArc {
                radii: c(0),
                rotation: v[2],
                large_arc: v[3] != 0.0,
                sweep: v[4] != 0.0,
                to: c(5),
                relative,
            },
            Kind::Close => Command::ClosePath,
        }
    }
}

struct Parser<'a> {
    lex: Lexer<'a>,
    peeked: Option<Lexeme<'a>>,
    subpaths: Vec<Subpath>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lex: Lexer::new(src),
            peeked: None,
            subpaths: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<Option<Lexeme<'a>>, ParseError> {
        match self.peeked.take() {
            Some(lexeme) => Ok(Some(lexeme)),
            None => self.lex.next().transpose(),
        }
    }

    fn parse(mut self) -> Result<Vec<Subpath>, ParseError> {
        let mut active: Option<Active> = None;

        while let Some(lexeme) = self.next()? {
            match lexeme.token {
                Token::Command(letter) => {
                    let cmd = Active::from_letter(letter, lexeme.position)?;
                    if self.subpaths.is_empty() && cmd.kind != Kind::Move {
                        return Err(ParseError::ExpectedMoveTo {
                            token: lexeme.text.to_string(),
                            position: lexeme.position,
                        });
                    }
                    // every letter but Z needs at least one full group
                    let command = self.parse_group(cmd)?;
                    self.push(command, lexeme)?;
                    active = Some(cmd.repeated());
                }
                Token::Number(_) => {
                    let cmd = match active {
                        Some(cmd) if cmd.kind != Kind::Close => cmd,
                        Some(_) => {
                            return Err(ParseError::ExpectedCommand {
                                token: lexeme.text.to_string(),
                                position: lexeme.position,
                            });
                        }
                        None => {
                            return Err(ParseError::ExpectedMoveTo {
                                token: lexeme.text.to_string(),
                                position: lexeme.position,
                            });
                        }
                    };
                    self.peeked = Some(lexeme);
                    let command = self.parse_group(cmd)?;
                    self.push(command, lexeme)?;
                }
            }
        }

        Ok(self.subpaths)
    }

    fn push(&mut self, command: Command, at: Lexeme<'a>) -> Result<(), ParseError> {
        if let Command::MoveTo { .. } = command {
            self.subpaths.push(Subpath {
                commands: vec![command],
            });
            return Ok(());
        }
        match self.subpaths.last_mut() {
            Some(subpath) => {
                subpath.commands.push(command);
                Ok(())
            }
            None => Err(ParseError::ExpectedMoveTo {
                token: at.text.to_string(),
                position: at.position,
            }),
        }
    }

    fn parse_group(&mut self, cmd: Active) -> Result<Command, ParseError> {
        let arity = cmd.kind.arity();
        let mut values = Vec::with_capacity(arity);

        for index in 0..arity {
            let value = if cmd.is_arc_flag(index) {
                self.parse_flag(cmd, index)?
            } else {
                self.parse_number(cmd, index)?
            };
            values.push(value);
        }

        Ok(cmd.build(&values))
    }

    fn parse_number(&mut self, cmd: Active, found: usize) -> Result<f64, ParseError> {
        match self.next()? {
            Some(Lexeme {
                token: Token::Number(value),
                ..
            }) => Ok(value),
            Some(other) => Err(ParseError::ArgumentCount {
                command: cmd.letter,
                expected: cmd.kind.arity(),
                found,
                token: other.text.to_string(),
                position: other.position,
            }),
            None => Err(ParseError::UnexpectedEnd {
                command: cmd.letter,
                position: self.lex.offset(),
            }),
        }
    }

    fn parse_flag(&mut self, cmd: Active, found: usize) -> Result<f64, ParseError> {
        // flags never follow a peeked lexeme: they sit mid-group
        debug_assert!(self.peeked.is_none());

        match self.lex.next_raw() {
            Some((_, '0')) => Ok(0.0),
            Some((_, '1')) => Ok(1.0),
            Some((position, c)) if c.is_alphabetic() => Err(ParseError::ArgumentCount {
                command: cmd.letter,
                expected: cmd.kind.arity(),
                found,
                token: c.to_string(),
                position,
            }),
            Some((position, c)) => Err(ParseError::MalformedNumber {
                token: c.to_string(),
                position,
            }),
            None => Err(ParseError::UnexpectedEnd {
                command: cmd.letter,
                position: self.lex.offset(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_parse_triangle() {
        let doc = parse("tri", "M0,0 L10,0 L10,10 Z").unwrap();
        assert_eq!(doc.id, "tri");
        assert_eq!(doc.subpaths.len(), 1);
        assert_eq!(
            doc.subpaths[0].commands,
            vec![
                Command::MoveTo {
                    to: xy(0.0, 0.0),
                    relative: false
                },
                Command::LineTo {
                    to: xy(10.0, 0.0),
                    relative: false
                },
                Command::LineTo {
                    to: xy(10.0, 10.0),
                    relative: false
                },
                Command::ClosePath,
            ]
        );
    }

    #[test]
    fn test_parse_cubic() {
        let doc = parse("", "M0,0 C0,10 10,10 10,0").unwrap();
        assert_eq!(
            doc.subpaths[0].commands[1],
            Command::CubicBezier {
                p1: xy(0.0, 10.0),
                p2: xy(10.0, 10.0),
                p3: xy(10.0, 0.0),
                relative: false,
            }
        );
    }

    #[test]
    fn test_implicit_repetition() {
        let test_cases = vec![
            // same-kind repeat
            ("M0 0 L1 1 2 2", vec!["MoveTo", "LineTo", "LineTo"]),
            // moveto repeats become lineto
            ("m1 1 2 2 3 3", vec!["MoveTo", "LineTo", "LineTo"]),
            (
                "M0 0 q1 1 2 2 3 3 4 4",
                vec!["MoveTo", "QuadraticBezier", "QuadraticBezier"],
            ),
            (
                "M0 0 h5 5 v1",
                vec![
                    "MoveTo",
                    "HorizontalLineTo",
                    "HorizontalLineTo",
                    "VerticalLineTo",
                ],
            ),
        ];

        for (input, expected) in test_cases {
            let doc = parse("", input).unwrap();
            let kinds: Vec<_> = doc.commands().map(Command::kind).collect();
            assert_eq!(kinds, expected, "input: {input}");
        }

        let doc = parse("", "m1 1 2 2").unwrap();
        assert_eq!(
            doc.subpaths[0].commands[1],
            Command::LineTo {
                to: xy(2.0, 2.0),
                relative: true
            }
        );
    }

    #[test]
    fn test_each_moveto_starts_subpath() {
        let doc = parse("", "M0,0 L1,1 Z L2,2 m5,5 l1,0 z").unwrap();
        assert_eq!(doc.subpaths.len(), 2);
        // commands after Z stay in the same subpath until the next M
        assert_eq!(doc.subpaths[0].commands.len(), 4);
        assert_eq!(doc.subpaths[1].commands.len(), 3);
    }

    #[test]
    fn test_compact_encoding() {
        let doc = parse("", "M10-5L.5.5c1,2,3,4,5,6").unwrap();
        let cmds = &doc.subpaths[0].commands;
        assert_eq!(
            cmds[0],
            Command::MoveTo {
                to: xy(10.0, -5.0),
                relative: false
            }
        );
        assert_eq!(
            cmds[1],
            Command::LineTo {
                to: xy(0.5, 0.5),
                relative: false
            }
        );
        assert!(cmds[2].is_relative());
    }

    #[test]
    fn test_packed_arc_flags() {
        let doc = parse("", "M0 0 a5 5 30 1110 10").unwrap();
        assert_eq!(
            doc.subpaths[0].commands[1],
            Command::EllipticalArc {
                radii: xy(5.0, 5.0),
                rotation: 30.0,
                large_arc: true,
                sweep: true,
                to: xy(10.0, 10.0),
                relative: true,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("e", "").unwrap().subpaths.len(), 0);
        assert_eq!(parse("e", "  \n\t").unwrap().subpaths.len(), 0);
    }

    #[test]
    fn test_parse_errors() {
        let test_cases = vec![
            (
                "X1,2",
                ParseError::UnknownCommand {
                    letter: 'X',
                    position: 0,
                },
            ),
            (
                "M0,0 L1 C1,1",
                ParseError::ArgumentCount {
                    command: 'L',
                    expected: 2,
                    found: 1,
                    token: "C".into(),
                    position: 8,
                },
            ),
            (
                // the flag slot is interrupted by the next command letter
                "M0 0 A5 5 0 L1,1",
                ParseError::ArgumentCount {
                    command: 'A',
                    expected: 7,
                    found: 3,
                    token: "L".into(),
                    position: 12,
                },
            ),
            (
                // a bare pair after C is an incomplete C, not an L
                "M0,0 C1,1 2,2 3,3 4,4",
                ParseError::UnexpectedEnd {
                    command: 'C',
                    position: 21,
                },
            ),
            (
                "M0,0 L1,-",
                ParseError::MalformedNumber {
                    token: "-".into(),
                    position: 8,
                },
            ),
            (
                "M0,0 L5",
                ParseError::UnexpectedEnd {
                    command: 'L',
                    position: 7,
                },
            ),
            (
                "L1,1",
                ParseError::ExpectedMoveTo {
                    token: "L".into(),
                    position: 0,
                },
            ),
            (
                "10,10",
                ParseError::ExpectedMoveTo {
                    token: "10".into(),
                    position: 0,
                },
            ),
            (
                "M0,0 L1,1 Z 5,5",
                ParseError::ExpectedCommand {
                    token: "5".into(),
                    position: 12,
                },
            ),
            (
                "M0 0 A5 5 0 2 0 1 1",
                ParseError::MalformedNumber {
                    token: "2".into(),
                    position: 12,
                },
            ),
        ];

        for (input, expected) in test_cases {
            assert_eq!(parse("", input), Err(expected), "input: {input}");
        }
    }

    #[test]
    fn test_unknown_command_message_names_letter() {
        let err = parse("bad", "X1,2").unwrap_err();
        assert!(err.to_string().contains("`X`"), "got: {err}");
    }
}
