//! The twin-cube token and its tipping rules.
//!
//! The token is two unit cubes, `a` and `b`, each with a lateral (board row
//! axis), depth (board column axis) and lift (height) coordinate. A move
//! shifts both halves along one axis by either the short or the long step
//! and rewrites their lifts, depending on whether the token stands upright,
//! lies along the move axis, or lies across it.

/// Equality tolerance for coordinates.
pub const EPSILON: f32 = 0.01;

/// One cell.
pub const SHORT_STEP: f32 = 0.4;
/// Two cells.
pub const LONG_STEP: f32 = 0.8;

/// Lift of a half resting on the board.
pub const LOW_LIFT: f32 = 0.4;
/// Lift of a half stacked on the other one.
pub const HIGH_LIFT: f32 = 0.8;

#[inline]
pub(crate) fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    Lateral,
    Depth,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::Lateral => Axis::Depth,
            Axis::Depth => Axis::Lateral,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Depth,
            Direction::Left | Direction::Right => Axis::Lateral,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Up | Direction::Right => 1.0,
            Direction::Down | Direction::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Half {
    A,
    B,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TokenHalf {
    pub lateral: f32,
    pub depth: f32,
    pub lift: f32,
}

impl TokenHalf {
    pub fn coord(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Lateral => self.lateral,
            Axis::Depth => self.depth,
        }
    }

    fn shift(&mut self, axis: Axis, by: f32) {
        match axis {
            Axis::Lateral => self.lateral += by,
            Axis::Depth => self.depth += by,
        }
    }
}

/// Which rule a move resolved to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveCase {
    /// Upright token tips over; `raised` is the half that was on top.
    TipOver { raised: Half },
    /// Token lying along the move axis stands up; `leader` is the half
    /// ahead in the move direction.
    StandUp { leader: Half },
    /// Token lying across the move axis rolls one cell.
    Roll,
}

/// Lift written on a stand-up move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Raise {
    /// The leading half ends on top.
    Leader,
    /// The trailing half ends on top.
    Trailer,
}

/// Per-direction parameters of the shared move rule.
///
/// The four directions differ in how far ahead a half has to be to count as
/// leading, whether the halves must also line up on the cross axis, which
/// half ends on top, and whether the other half is explicitly lowered.
#[derive(Debug, Copy, Clone)]
struct MoveRule {
    b_lead_margin: f32,
    a_lead_margin: f32,
    b_lead_needs_cross: bool,
    a_lead_needs_cross: bool,
    raise: Raise,
    lower_other: bool,
}

impl MoveRule {
    const fn for_direction(direction: Direction) -> MoveRule {
        match direction {
            Direction::Up => MoveRule {
                b_lead_margin: 0.001,
                a_lead_margin: EPSILON,
                b_lead_needs_cross: false,
                a_lead_needs_cross: false,
                raise: Raise::Leader,
                lower_other: true,
            },
            Direction::Down => MoveRule {
                b_lead_margin: EPSILON,
                a_lead_margin: EPSILON,
                b_lead_needs_cross: false,
                a_lead_needs_cross: false,
                raise: Raise::Leader,
                lower_other: true,
            },
            Direction::Left => MoveRule {
                b_lead_margin: 0.0,
                a_lead_margin: 0.0,
                b_lead_needs_cross: true,
                a_lead_needs_cross: true,
                raise: Raise::Trailer,
                lower_other: true,
            },
            Direction::Right => MoveRule {
                b_lead_margin: 0.0,
                a_lead_margin: 0.0,
                b_lead_needs_cross: false,
                a_lead_needs_cross: true,
                raise: Raise::Trailer,
                lower_other: false,
            },
        }
    }
}

/// The two halves of the token.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TokenPair {
    pub a: TokenHalf,
    pub b: TokenHalf,
}

impl Default for TokenPair {
    fn default() -> Self {
        Self::upright_at(0.0, 0.0)
    }
}

impl TokenPair {
    /// Upright token on the cell at `(lateral, depth)`, `b` on top.
    pub fn upright_at(lateral: f32, depth: f32) -> Self {
        Self {
            a: TokenHalf { lateral, depth, lift: LOW_LIFT },
            b: TokenHalf { lateral, depth, lift: HIGH_LIFT },
        }
    }

    fn half_mut(&mut self, half: Half) -> &mut TokenHalf {
        match half {
            Half::A => &mut self.a,
            Half::B => &mut self.b,
        }
    }

    pub fn is_upright(&self) -> bool {
        near(self.a.lateral, self.b.lateral) && near(self.a.depth, self.b.depth)
    }

    /// Applies one directional move. Every call moves the token; nothing is
    /// rejected here, falling off is judged afterwards by the progression.
    pub fn apply_move(&mut self, direction: Direction) -> MoveCase {
        let rule = MoveRule::for_direction(direction);
        let axis = direction.axis();
        let sign = direction.sign();

        let along_a = self.a.coord(axis);
        let along_b = self.b.coord(axis);
        let along_aligned = near(along_a, along_b);
        let cross_aligned = near(self.a.coord(axis.cross()), self.b.coord(axis.cross()));

        let b_ahead = (along_b - along_a) * sign;
        let a_ahead = (along_a - along_b) * sign;

        let case = if along_aligned && cross_aligned && self.a.lift > self.b.lift {
            MoveCase::TipOver { raised: Half::A }
        } else if along_aligned && cross_aligned && self.a.lift < self.b.lift {
            MoveCase::TipOver { raised: Half::B }
        } else if b_ahead > rule.b_lead_margin && (cross_aligned || !rule.b_lead_needs_cross) {
            MoveCase::StandUp { leader: Half::B }
        } else if a_ahead > rule.a_lead_margin && (cross_aligned || !rule.a_lead_needs_cross) {
            MoveCase::StandUp { leader: Half::A }
        } else {
            MoveCase::Roll
        };

        match case {
            MoveCase::TipOver { raised } => {
                let other = other_half(raised);
                self.half_mut(raised).shift(axis, sign * LONG_STEP);
                self.half_mut(other).shift(axis, sign * SHORT_STEP);
                self.a.lift = LOW_LIFT;
                self.b.lift = LOW_LIFT;
            }
            MoveCase::StandUp { leader } => {
                let trailer = other_half(leader);
                self.half_mut(leader).shift(axis, sign * SHORT_STEP);
                self.half_mut(trailer).shift(axis, sign * LONG_STEP);

                let (top, bottom) = match rule.raise {
                    Raise::Leader => (leader, trailer),
                    Raise::Trailer => (trailer, leader),
                };
                self.half_mut(top).lift = HIGH_LIFT;
                if rule.lower_other {
                    self.half_mut(bottom).lift = LOW_LIFT;
                }
            }
            MoveCase::Roll => {
                self.a.shift(axis, sign * SHORT_STEP);
                self.b.shift(axis, sign * SHORT_STEP);
            }
        }

        log::trace!("{direction:?} -> {case:?}: a={:?} b={:?}", self.a, self.b);
        case
    }

    /// Lowers both halves by `step` (falling animation).
    pub fn sink(&mut self, step: f32) {
        self.a.lift -= step;
        self.b.lift -= step;
    }

    pub fn laterals(&self) -> [f32; 2] {
        [self.a.lateral, self.b.lateral]
    }

    pub fn depths(&self) -> [f32; 2] {
        [self.a.depth, self.b.depth]
    }
}

fn other_half(half: Half) -> Half {
    match half {
        Half::A => Half::B,
        Half::B => Half::A,
    }
}
