//! The fundamental and simple types of `rookie_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::{Add, AddAssign, Mul, Neg, Not};
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // A, B, C, D, E, F, G, H
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// Generous upper bound of legal moves for any position decodable from FEN.
// The most measured for a legal chess position is 218.
pub const MAX_MOVES: usize = 256;

// The greatest depth reachable for the engine during iterative deepening.
pub const MAX_DEPTH: PlyKind = 40;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for max ply/depth.
pub type PlyKind = u8;

// Type alias to make changing Cp inner type easy if needed.
pub type CpKind = i32;

/// Centipawn, a common unit of measurement in chess, where 100 Centipawn == 1 Pawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Cp(pub CpKind);

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// Kinds of chess pieces, in ascending order of material value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A chess piece is immutable, pieces are replaced wholesale instead of mutated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Observe Castling rights for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Castling(u8);

/// Castling Enum constants.
impl Castling {
    pub const W_KING: Castling = Castling(0b00000001);
    pub const W_QUEEN: Castling = Castling(0b00000010);
    pub const B_KING: Castling = Castling(0b00000100);
    pub const B_QUEEN: Castling = Castling(0b00001000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0u8);
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order ABCDEFGH.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum File {
    A, B, C, D, E, F, G, H = 7u8,
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order 12345678.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8 = 7u8,
}

/// Square
/// Every possible square on a chess board.
/// The discriminant of a square is its linear board index,
/// `index = (rank - 1) * 8 + (file - 1)`, so A1 is 0 and H8 is 63.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8 = 63u8,
}

/// Move
/// A single chess "half move", or "ply", from one square to another.
/// Castling and en passant are flagged by the move generator so that
/// applying a move never has to rediscover its kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) castling: bool,
    pub(crate) en_passant: bool,
    pub(crate) promotion: Option<PieceKind>,
}

////////////
// Traits //
////////////

/// SquareIndexable
/// A chessboard has 64 squares on it. SquareIndexable can be implemented
/// for types whose values can map directly to a chess Square's index.
pub trait SquareIndexable {
    /// idx(&self) must return a number between 0-63 inclusive, representing
    /// a square on a chess board in little-endian, rank-file order.
    /// Warning: Values outside of 0-63 may panic.
    fn idx(&self) -> usize;
}

// Blanket impl on references of types that are SquareIndexable.
impl<I: SquareIndexable> SquareIndexable for &I {
    fn idx(&self) -> usize {
        I::idx(*self)
    }
}

//////////////////////
/// Implementations //
//////////////////////

impl Cp {
    pub const MIN: Cp = Self(CpKind::MIN + 1); // + 1 to avoid overflow error on negate.
    pub const MAX: Cp = Self(CpKind::MAX);
    /// Score of a side that has delivered checkmate at the root.
    /// Mates found deeper in the tree score slightly less.
    pub const CHECKMATE: Cp = Self(CpKind::MAX / 2);
    pub const DRAW: Cp = Self(0);

    /// Returns the sign of Centipawn value, either 1, -1, or 0.
    pub const fn signum(&self) -> CpKind {
        self.0.signum()
    }

    /// Returns true if the score is a checkmate for either side.
    pub const fn is_mate(&self) -> bool {
        self.0.abs() >= Self::CHECKMATE.0 - MAX_DEPTH as CpKind * 2
    }

    /// Checkmate score from the perspective of the mating side, `ply` plies from the root.
    pub const fn mate_in(ply: PlyKind) -> Self {
        Self(Self::CHECKMATE.0 - ply as CpKind)
    }
}

impl Add for Cp {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Cp {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Mul<CpKind> for Cp {
    type Output = Cp;
    fn mul(self, rhs: CpKind) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Neg for Cp {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Cp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Direction a pawn of this color advances in, in ranks.
    pub const fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank that pawns of this color start on and may double push from.
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// Rank that pawns of this color promote on.
    pub const fn promotion_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }

    /// Rank the king and rooks of this color start on.
    pub const fn home_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.to_char()
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl PieceKind {
    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    /// Uppercase letters are White, lowercase letters are Black.
    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = match value.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => {
                return Err((
                    ErrorKind::ParsePieceMalformed,
                    "char is not in PNBRQKpnbrqk",
                )
                    .into())
            }
        };
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Castling {
    /// Make new Castling with all rights of initial chess position.
    pub const fn start_position() -> Self {
        Self::ALL
    }

    /// Returns true if there are no castling rights.
    pub const fn is_none(&self) -> bool {
        self.0 == 0u8
    }

    /// Returns true if Castling mask has all of provided bits.
    pub const fn has(&self, rights: Castling) -> bool {
        self.0 & rights.0 == rights.0
    }

    /// Set given bits to '1' on Castling mask.
    pub fn set(&mut self, rights: Castling) {
        self.0 |= rights.0;
    }

    /// Set given bits to '0' on Castling mask.
    pub fn clear(&mut self, rights: Castling) {
        self.0 &= !rights.0;
    }

    /// Removes all castling rights for a color.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => self.clear(Self::W_SIDE),
            Color::Black => self.clear(Self::B_SIDE),
        }
    }

    /// The king side right of a color.
    pub const fn king_side(color: Color) -> Castling {
        match color {
            Color::White => Self::W_KING,
            Color::Black => Self::B_KING,
        }
    }

    /// The queen side right of a color.
    pub const fn queen_side(color: Color) -> Castling {
        match color {
            Color::White => Self::W_QUEEN,
            Color::Black => Self::B_QUEEN,
        }
    }

    /// The right that is lost when a rook leaves, or is captured on, a corner square.
    pub const fn for_rook_square(square: Square) -> Option<Castling> {
        match square {
            Square::H1 => Some(Self::W_KING),
            Square::A1 => Some(Self::W_QUEEN),
            Square::H8 => Some(Self::B_KING),
            Square::A8 => Some(Self::B_QUEEN),
            _ => None,
        }
    }
}

/// Defaults to Castling rights for starting chess position, ALL.
impl Default for Castling {
    fn default() -> Self {
        Self::start_position()
    }
}

impl std::ops::BitOr for Castling {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Displays in FEN-component format.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            return f.write_char('-');
        }
        for (rights, ch) in [
            (Self::W_KING, 'K'),
            (Self::W_QUEEN, 'Q'),
            (Self::B_KING, 'k'),
            (Self::B_QUEEN, 'q'),
        ] {
            if self.has(rights) {
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

/// Castling ::= '-' | ['K'] ['Q'] ['k'] ['q']
impl FromStr for Castling {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if s == "-" {
            return Ok(Castling::NONE);
        }
        if s.is_empty() || s.len() > 4 {
            return Err((ErrorKind::ParseCastlingMalformed, "expected - or 1-4 of KQkq").into());
        }

        let mut castling_rights = Castling::NONE;
        for ch in s.chars() {
            let rights = match ch {
                'K' => Self::W_KING,
                'Q' => Self::W_QUEEN,
                'k' => Self::B_KING,
                'q' => Self::B_QUEEN,
                _ => return Err((ErrorKind::ParseCastlingMalformed, "char not of KQkq").into()),
            };
            castling_rights.set(rights);
        }
        Ok(castling_rights)
    }
}

impl File {
    /// File enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        use File::*;
        match value {
            0 => Some(A),
            1 => Some(B),
            2 => Some(C),
            3 => Some(D),
            4 => Some(E),
            5 => Some(F),
            6 => Some(G),
            7 => Some(H),
            _ => None,
        }
    }
    /// Get the character representation of File, in lowercase.
    pub const fn to_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl Rank {
    /// Rank enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        use Rank::*;
        match value {
            0 => Some(R1),
            1 => Some(R2),
            2 => Some(R3),
            3 => Some(R4),
            4 => Some(R5),
            5 => Some(R6),
            6 => Some(R7),
            7 => Some(R8),
            _ => None,
        }
    }
    pub const fn to_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl TryFrom<char> for File {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'a'..='h' => Ok(File::from_u8(ch as u8 - b'a').unwrap_or(File::A)),
            _ => Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '1'..='8' => Ok(Rank::from_u8(ch as u8 - b'1').unwrap_or(Rank::R1)),
            _ => Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into()),
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl SquareIndexable for (File, Rank) {
    fn idx(&self) -> usize {
        let &(file, rank) = self;
        NUM_FILES * rank as usize + file as usize
    }
}

impl Square {
    /// Every square in index order.
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Square enum variants cover all u8 values from 0-63 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < NUM_SQUARES {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Square from a linear board index, failing outside of 0-63.
    pub fn from_index(index: usize) -> error::Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| (ErrorKind::SquareOutOfRange, format!("index {index}")).into())
    }

    /// Square from a 1-based chess file and rank, failing outside of 1-8.
    pub fn new(file: u8, rank: u8) -> error::Result<Self> {
        if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
            return Err((
                ErrorKind::SquareOutOfRange,
                format!("file {file}, rank {rank}"),
            )
                .into());
        }
        Self::from_index((rank as usize - 1) * NUM_FILES + (file as usize - 1))
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        Self::ALL.into_iter()
    }

    pub fn file(&self) -> File {
        File::from_u8(self.file_u8()).unwrap_or(File::A)
    }

    pub fn rank(&self) -> Rank {
        Rank::from_u8(self.rank_u8()).unwrap_or(Rank::R1)
    }

    /// Returns 0-based file (0,1,2,3,4,5,6,7), not 1-based chess file.
    pub const fn file_u8(&self) -> u8 {
        *self as u8 % NUM_FILES as u8
    }

    /// Returns 0-based rank (0,1,2,3,4,5,6,7), not 1-based chess rank.
    pub const fn rank_u8(&self) -> u8 {
        *self as u8 / NUM_FILES as u8
    }

    /// Returns the square displaced by the given file and rank steps,
    /// or None if that lands off of the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file_u8() as i8 + file_delta;
        let rank = self.rank_u8() as i8 + rank_delta;
        if file < 0 || file >= NUM_FILES as i8 || rank < 0 || rank >= NUM_RANKS as i8 {
            return None;
        }
        Self::from_u8((rank * NUM_FILES as i8 + file) as u8)
    }
}

impl From<(File, Rank)> for Square {
    fn from(coordinate: (File, Rank)) -> Self {
        Self::ALL[coordinate.idx()]
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let file = File::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        let rank = Rank::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        if chars.next().is_some() {
            return Err((ErrorKind::ParseSquareMalformed, s).into());
        }
        Ok(Square::from((file, rank)))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl SquareIndexable for Square {
    fn idx(&self) -> usize {
        *self as usize
    }
}

impl Move {
    /// A plain move or capture, optionally promoting.
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            castling: false,
            en_passant: false,
            promotion,
        }
    }

    /// A king move that castles, relocating the wing's rook as well.
    pub const fn castle(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            castling: true,
            en_passant: false,
            promotion: None,
        }
    }

    /// A pawn capture onto the en passant square.
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            castling: false,
            en_passant: true,
            promotion: None,
        }
    }

    // Immutable Getters
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn to(&self) -> Square {
        self.to
    }
    pub const fn is_castling(&self) -> bool {
        self.castling
    }
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns true if `other` names the same squares as self.
    /// A `None` promotion in `other` matches any promotion,
    /// so text input like `e7e8` selects the generated queening move.
    pub fn matches(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && (other.promotion.is_none() || other.promotion == self.promotion)
    }
}

/// Parses `Pure Algebraic Coordinate Notation`.
impl FromStr for Move {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err((ErrorKind::ParseMoveMalformed, s).into());
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;

        let promotion = match s.chars().nth(4) {
            None => None,
            Some('q') => Some(PieceKind::Queen),
            Some('r') => Some(PieceKind::Rook),
            Some('b') => Some(PieceKind::Bishop),
            Some('n') => Some(PieceKind::Knight),
            Some(_) => return Err((ErrorKind::ParseMoveMalformed, s).into()),
        };

        Ok(Self::new(from, to, promotion))
    }
}

/// # Example
/// Move { from: E2, to: E4, .. } -> `e2e4`, a promotion appends its piece letter `a7a8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece_kind) = self.promotion {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
