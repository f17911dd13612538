use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::once,
    ops::Index,
};

use crate::{
    castling::{CastleSide, CastlingRights},
    history::MoveRecord,
    outcome::Outcome,
    piece::{Piece, PieceKind},
    player::Player,
    square::{Offset, Square},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    NoKing(Player),
    ExceededKings(Player),
    Occupied(Square),
    MisplacedPiece(Square),
    PawnOnBackRank(Square),
    NonPlayerInCheck,
    InvalidCastlingRights,
    InvalidEnPassant,
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::NoKing(player) => write!(f, "no {player} king found")?,
            InvalidBoard::ExceededKings(player) => write!(f, "found more than 1 {player} king")?,
            InvalidBoard::Occupied(square) => write!(f, "{square} is occupied twice")?,
            InvalidBoard::MisplacedPiece(square) => {
                write!(f, "piece on {square} disagrees with its own position")?;
            }
            InvalidBoard::PawnOnBackRank(square) => write!(f, "found a pawn on {square}")?,
            InvalidBoard::NonPlayerInCheck => write!(f, "non-player in check")?,
            InvalidBoard::InvalidCastlingRights => write!(f, "invalid castling rights")?,
            InvalidBoard::InvalidEnPassant => write!(f, "invalid en passant target")?,
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}

/// A position: piece placement, the player to move, castling rights and the
/// en passant target.
///
/// `Board` is `Copy`, so trying out a move is a matter of applying it to a
/// copy; the original is never touched while moves are being filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
    current_player: Player,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}
impl Board {
    pub fn starting_position() -> Self {
        let mut cells = [[None; 8]; 8];
        for player in Player::BOTH {
            for (col, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                let home = Square::new(player.home_row(), col);
                let pawn = Square::new(player.pawn_row(), col);
                cells[home.row as usize][home.col as usize] = Some(Piece::new(kind, player, home));
                cells[pawn.row as usize][pawn.col as usize] =
                    Some(Piece::new(PieceKind::Pawn, player, pawn));
            }
        }
        Board {
            cells,
            current_player: Player::White,
            castling_rights: CastlingRights::all(),
            en_passant: None,
        }
    }
    /// Builds a position from loose pieces. Kings and rooks count as unmoved
    /// exactly when a castling right still refers to them.
    pub fn setup(
        pieces: impl IntoIterator<Item = (Square, Player, PieceKind)>,
        current_player: Player,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, InvalidBoard> {
        let mut board = Board {
            cells: [[None; 8]; 8],
            current_player,
            castling_rights,
            en_passant,
        };
        for (square, player, kind) in pieces {
            if board[square].is_some() {
                return Err(InvalidBoard::Occupied(square));
            }
            let has_moved = match kind {
                PieceKind::King => {
                    square != CastleSide::king_origin(player) || !castling_rights.any(player)
                }
                PieceKind::Rook => !CastleSide::of_rook_origin(player, square)
                    .is_some_and(|side| castling_rights.get(player, side)),
                _ => false,
            };
            *board.cell_mut(square) = Some(Piece {
                kind,
                player,
                square,
                has_moved,
            });
        }
        board.validate()?;
        Ok(board)
    }
    pub fn current_player(&self) -> Player {
        self.current_player
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.cells[square.row as usize][square.col as usize]
    }
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().copied().flatten()
    }
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.is_player(player))
    }
    pub fn king(&self, player: Player) -> Option<Piece> {
        self.pieces_of(player)
            .find(|piece| piece.kind == PieceKind::King)
    }
    /// Square of the pawn an en passant capture onto `destination` would take.
    pub fn en_passant_capture(&self, player: Player, destination: Square) -> Option<Square> {
        if self.en_passant != Some(destination) {
            return None;
        }
        let captured = destination.move_by(-Offset::pawn_push(player))?;
        self[captured]
            .is_some_and(|piece| piece.kind == PieceKind::Pawn && !piece.is_player(player))
            .then_some(captured)
    }
    fn holds(&self, square: Square, player: Player, kinds: &[PieceKind]) -> bool {
        self[square].is_some_and(|piece| piece.is_player(player) && kinds.contains(&piece.kind))
    }
    fn first_piece_on_line(&self, square: Square, direction: Offset) -> Option<Piece> {
        square.line(direction).find_map(|position| self[position])
    }
    fn step_attacks(
        &self,
        square: Square,
        attacker: Player,
        offsets: &[Offset],
        kind: PieceKind,
    ) -> bool {
        offsets
            .iter()
            .filter_map(|offset| square.move_by(*offset))
            .any(|position| self.holds(position, attacker, &[kind]))
    }
    fn slide_attacks(
        &self,
        square: Square,
        attacker: Player,
        directions: &[Offset],
        kinds: &[PieceKind],
    ) -> bool {
        directions.iter().any(|direction| {
            self.first_piece_on_line(square, *direction)
                .is_some_and(|piece| piece.is_player(attacker) && kinds.contains(&piece.kind))
        })
    }
    /// Whether any piece of `attacker` could capture on `square`.
    pub fn is_attacked_by(&self, square: Square, attacker: Player) -> bool {
        self.step_attacks(
            square,
            attacker,
            &Offset::pawn_captures(!attacker),
            PieceKind::Pawn,
        ) || self.step_attacks(square, attacker, &Offset::KNIGHT_MOVES, PieceKind::Knight)
            || self.step_attacks(square, attacker, &Offset::KING_MOVES, PieceKind::King)
            || self.slide_attacks(
                square,
                attacker,
                &Offset::ROOK_DIRECTIONS,
                &[PieceKind::Rook, PieceKind::Queen],
            )
            || self.slide_attacks(
                square,
                attacker,
                &Offset::BISHOP_DIRECTIONS,
                &[PieceKind::Bishop, PieceKind::Queen],
            )
    }
    pub fn is_in_check(&self, player: Player) -> bool {
        self.king(player)
            .is_some_and(|king| self.is_attacked_by(king.square, !player))
    }
    /// Castling is available when the right is intact, king and rook stand
    /// unmoved on their home squares with nothing between them, and the king
    /// is not in check nor passes through or lands on an attacked square.
    pub fn king_can_castle(&self, player: Player, side: CastleSide) -> bool {
        if !self.castling_rights.get(player, side) {
            return false;
        }
        let king_origin = CastleSide::king_origin(player);
        let rook_origin = side.rook_origin(player);
        let unmoved = |square: Square, kind: PieceKind| {
            self[square]
                .is_some_and(|piece| piece.is_player(player) && piece.kind == kind && !piece.has_moved)
        };
        if !unmoved(king_origin, PieceKind::King) || !unmoved(rook_origin, PieceKind::Rook) {
            return false;
        }
        if king_origin
            .between_on_row(rook_origin)
            .any(|square| self[square].is_some())
        {
            return false;
        }
        let king_destination = side.king_destination(player);
        once(king_origin)
            .chain(king_origin.between_on_row(king_destination))
            .chain(once(king_destination))
            .all(|square| !self.is_attacked_by(square, !player))
    }
    /// Pseudo-legal destinations of the piece on `square`, whoever owns it.
    pub fn piece_moves(&self, square: Square) -> Vec<Square> {
        if !square.is_on_board() {
            return Vec::new();
        }
        self[square]
            .map(|piece| piece.valid_piece_moves(self))
            .unwrap_or_default()
    }
    fn is_move_safe(&self, origin: Square, destination: Square) -> bool {
        let mut board = *self;
        board
            .apply(origin, destination, None)
            .is_some_and(|record| !board.is_in_check(record.piece.player))
    }
    /// Legal destinations of the piece on `square`. Empty when the square is
    /// empty or holds a piece of the player not to move.
    pub fn valid_moves(&self, square: Square) -> Vec<Square> {
        if !square.is_on_board()
            || !self[square].is_some_and(|piece| piece.is_player(self.current_player))
        {
            return Vec::new();
        }
        self.piece_moves(square)
            .into_iter()
            .filter(|destination| self.is_move_safe(square, *destination))
            .collect()
    }
    pub fn all_valid_moves(&self) -> Vec<(Square, Square)> {
        self.pieces_of(self.current_player)
            .flat_map(|piece| {
                self.valid_moves(piece.square)
                    .into_iter()
                    .map(move |destination| (piece.square, destination))
            })
            .collect()
    }
    pub fn has_valid_moves(&self) -> bool {
        self.pieces_of(self.current_player)
            .any(|piece| !self.valid_moves(piece.square).is_empty())
    }
    pub fn outcome(&self) -> Outcome {
        if self.has_valid_moves() {
            Outcome::Ongoing
        } else if self.is_in_check(self.current_player) {
            Outcome::Win(!self.current_player)
        } else {
            Outcome::Stalemate
        }
    }
    /// Plays a move without checking it against the rules. A pawn reaching
    /// its last row becomes `promotion`, or a queen when none is given.
    ///
    /// Returns `None`, leaving the board as is, when `origin` is empty or
    /// either square is off the board.
    pub fn apply(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Option<MoveRecord> {
        if !origin.is_on_board() || !destination.is_on_board() {
            return None;
        }
        let mut piece = self[origin]?;
        let player = piece.player;
        let castling_rights = self.castling_rights;
        let en_passant = self.en_passant;

        let captured = match self[destination] {
            Some(captured) => Some(captured),
            None if piece.kind == PieceKind::Pawn => self
                .en_passant_capture(player, destination)
                .and_then(|square| self[square]),
            None => None,
        };
        if let Some(captured) = captured {
            *self.cell_mut(captured.square) = None;
            if captured.kind == PieceKind::Rook {
                self.castling_rights
                    .remove_for_rook(captured.player, captured.square);
            }
        }
        let castling_rook = if piece.kind == PieceKind::King
            && origin == CastleSide::king_origin(player)
        {
            CastleSide::from_king_move(origin, destination).and_then(|side| {
                let rook = self[side.rook_origin(player)]
                    .filter(|rook| rook.kind == PieceKind::Rook && rook.is_player(player))?;
                let rook_destination = side.rook_destination(player);
                if self[rook_destination].is_some() {
                    return None;
                }
                *self.cell_mut(rook.square) = None;
                *self.cell_mut(rook_destination) = Some(Piece {
                    square: rook_destination,
                    has_moved: true,
                    ..rook
                });
                Some((rook, rook_destination))
            })
        } else {
            None
        };
        match piece.kind {
            PieceKind::King => self.castling_rights.clear(player),
            PieceKind::Rook => self.castling_rights.remove_for_rook(player, origin),
            _ => (),
        }
        self.en_passant = (piece.kind == PieceKind::Pawn
            && origin.row.abs_diff(destination.row) == 2)
            .then(|| origin.move_by(Offset::pawn_push(player)))
            .flatten();
        let promotion = (piece.kind == PieceKind::Pawn
            && destination.row == player.promotion_row())
        .then(|| promotion.unwrap_or(PieceKind::Queen));

        let record = MoveRecord {
            piece,
            destination,
            captured,
            castling_rook,
            promotion,
            castling_rights,
            en_passant,
        };
        if let Some(kind) = promotion {
            piece.kind = kind;
        }
        piece.square = destination;
        piece.has_moved = true;
        *self.cell_mut(origin) = None;
        *self.cell_mut(destination) = Some(piece);
        self.current_player = !player;

        debug_assert_eq!(self.validate_structure(), Ok(()));
        Some(record)
    }
    /// Takes back a move produced by [`Board::apply`] on this position.
    pub fn revert(&mut self, record: &MoveRecord) {
        *self.cell_mut(record.destination) = None;
        if let Some((rook, rook_destination)) = record.castling_rook {
            *self.cell_mut(rook_destination) = None;
            *self.cell_mut(rook.square) = Some(rook);
        }
        *self.cell_mut(record.origin()) = Some(record.piece);
        if let Some(captured) = record.captured {
            *self.cell_mut(captured.square) = Some(captured);
        }
        self.castling_rights = record.castling_rights;
        self.en_passant = record.en_passant;
        self.current_player = record.piece.player;

        debug_assert_eq!(self.validate_structure(), Ok(()));
    }
    /// Checks invariants that no sequence of moves may break: one king per
    /// player, no pawn on a back rank, every piece agreeing with its cell.
    pub fn validate_structure(&self) -> Result<(), InvalidBoard> {
        for square in Square::all() {
            if let Some(piece) = self[square] {
                if piece.square != square {
                    return Err(InvalidBoard::MisplacedPiece(square));
                }
                if piece.kind == PieceKind::Pawn && matches!(square.row, 0 | 7) {
                    return Err(InvalidBoard::PawnOnBackRank(square));
                }
            }
        }
        for player in Player::BOTH {
            let mut kings = self
                .pieces_of(player)
                .filter(|piece| piece.kind == PieceKind::King);
            if kings.next().is_none() {
                return Err(InvalidBoard::NoKing(player));
            }
            if kings.next().is_some() {
                return Err(InvalidBoard::ExceededKings(player));
            }
        }
        Ok(())
    }
    /// [`Board::validate_structure`] plus the conditions of a reachable
    /// position: the player who just moved is not in check, castling rights
    /// point at unmoved pieces, and the en passant target sits behind a pawn
    /// that just made a double push.
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        self.validate_structure()?;
        if self.is_in_check(!self.current_player) {
            return Err(InvalidBoard::NonPlayerInCheck);
        }
        for player in Player::BOTH {
            for side in CastleSide::BOTH {
                if !self.castling_rights.get(player, side) {
                    continue;
                }
                let unmoved = |square: Square, kind: PieceKind| {
                    self[square].is_some_and(|piece| {
                        piece.is_player(player) && piece.kind == kind && !piece.has_moved
                    })
                };
                if !unmoved(CastleSide::king_origin(player), PieceKind::King)
                    || !unmoved(side.rook_origin(player), PieceKind::Rook)
                {
                    return Err(InvalidBoard::InvalidCastlingRights);
                }
            }
        }
        if let Some(en_passant) = self.en_passant {
            let pusher = !self.current_player;
            let valid = en_passant.row == pusher.pawn_row().wrapping_add_signed(pusher.pawn_direction())
                && self[en_passant].is_none()
                && en_passant
                    .move_by(Offset::pawn_push(pusher))
                    .is_some_and(|square| self.holds(square, pusher, &[PieceKind::Pawn]));
            if !valid {
                return Err(InvalidBoard::InvalidEnPassant);
            }
        }
        Ok(())
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.cells[index.row as usize][index.col as usize]
    }
}
