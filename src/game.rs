use crate::{
    board::Board,
    castling::CastleSide,
    error::{EmptyUndo, MoveError},
    history::MoveRecord,
    outcome::Outcome,
    piece::{Piece, PieceKind},
    player::Player,
    square::Square,
};

/// A game in progress: the position together with the log of moves that led
/// to it.
///
/// Every query answers for the player to move. Refusing moves once the game
/// is over is left to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    move_log: Vec<MoveRecord>,
}
impl GameState {
    pub fn new() -> Self {
        GameState::from_board(Board::starting_position())
    }
    /// Starts from an arbitrary position with an empty log.
    pub fn from_board(board: Board) -> Self {
        GameState {
            board,
            move_log: Vec::new(),
        }
    }
    pub fn reset(&mut self) {
        *self = GameState::new();
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn move_log(&self) -> &[MoveRecord] {
        &self.move_log
    }
    /// The piece on the given cell, `None` when it is empty or off the board.
    pub fn get_piece(&self, row: u8, col: u8) -> Option<Piece> {
        Square::new_checked(row, col).and_then(|square| self.board[square])
    }
    /// Whether the cell holds a piece of the player to move.
    pub fn is_valid_piece(&self, row: u8, col: u8) -> bool {
        self.get_piece(row, col)
            .is_some_and(|piece| piece.is_player(self.whose_turn()))
    }
    pub fn get_valid_moves(&self, square: Square) -> Vec<Square> {
        if !square.is_on_board() {
            return Vec::new();
        }
        self.board.valid_moves(square)
    }
    /// Pseudo-legal destinations of whatever piece stands on `square`.
    pub fn get_valid_piece_moves(&self, square: Square) -> Vec<Square> {
        if !square.is_on_board() {
            return Vec::new();
        }
        self.board.piece_moves(square)
    }
    pub fn all_valid_moves(&self) -> Vec<(Square, Square)> {
        self.board.all_valid_moves()
    }
    pub fn whose_turn(&self) -> Player {
        self.board.current_player()
    }
    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check(self.whose_turn())
    }
    pub fn king_can_castle_left(&self, player: Player) -> bool {
        self.board.king_can_castle(player, CastleSide::QueenSide)
    }
    pub fn king_can_castle_right(&self, player: Player) -> bool {
        self.board.king_can_castle(player, CastleSide::KingSide)
    }
    pub fn checkmate_stalemate_checker(&self) -> Outcome {
        self.board.outcome()
    }
    /// Whether an unvalidated move keeps the board well formed: no capture of
    /// an own piece or of a king, no pawn left on a back rank, and a castling
    /// rook only jumps over empty squares.
    fn is_move_sound(&self, piece: Piece, destination: Square) -> bool {
        if self.board[destination]
            .is_some_and(|other| other.is_player(piece.player) || other.kind == PieceKind::King)
        {
            return false;
        }
        match piece.kind {
            PieceKind::Pawn => {
                !matches!(destination.row, 0 | 7)
                    || destination.row == piece.player.promotion_row()
            }
            PieceKind::King if piece.square == CastleSide::king_origin(piece.player) => {
                CastleSide::from_king_move(piece.square, destination).is_none_or(|side| {
                    piece
                        .square
                        .between_on_row(side.rook_origin(piece.player))
                        .all(|square| self.board[square].is_none())
                })
            }
            _ => true,
        }
    }
    fn play(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
        validate: bool,
    ) -> Result<MoveRecord, MoveError> {
        if !origin.is_on_board() {
            return Err(MoveError::InvalidSelection);
        }
        let piece = self.board[origin]
            .filter(|piece| piece.is_player(self.whose_turn()))
            .ok_or(MoveError::InvalidSelection)?;
        if !destination.is_on_board() || origin == destination {
            return Err(MoveError::IllegalMove);
        }
        let promotes =
            piece.kind == PieceKind::Pawn && destination.row == piece.player.promotion_row();
        if let Some(kind) = promotion {
            if !promotes || !PieceKind::PROMOTION_CHOICES.contains(&kind) {
                return Err(MoveError::IllegalMove);
            }
        }
        if validate {
            if !self.board.valid_moves(origin).contains(&destination) {
                return Err(MoveError::IllegalMove);
            }
        } else if !self.is_move_sound(piece, destination) {
            return Err(MoveError::IllegalMove);
        }
        let record = self
            .board
            .apply(origin, destination, promotion)
            .ok_or(MoveError::InvalidSelection)?;
        self.move_log.push(record);
        Ok(record)
    }
    /// Plays a legal move, promoting to `promotion` (a queen when `None`) if
    /// a pawn reaches its last row.
    pub fn try_move(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, MoveError> {
        self.play(origin, destination, promotion, true)
    }
    /// Returns `false` and leaves the game untouched when the move is
    /// rejected.
    ///
    /// With `validate` unset the move is not checked against the rules, only
    /// against what would corrupt the board: the origin must hold a piece of
    /// the player to move, and the board must stay well formed: no own piece
    /// or king taken, no pawn on its own back rank, no castling rook jumping
    /// over a piece.
    pub fn move_piece(&mut self, origin: Square, destination: Square, validate: bool) -> bool {
        self.play(origin, destination, None, validate).is_ok()
    }
    pub fn move_piece_with_promotion(
        &mut self,
        origin: Square,
        destination: Square,
        kind: PieceKind,
    ) -> bool {
        self.play(origin, destination, Some(kind), true).is_ok()
    }
    pub fn try_undo(&mut self) -> Result<MoveRecord, EmptyUndo> {
        let record = self.move_log.pop().ok_or(EmptyUndo)?;
        self.board.revert(&record);
        Ok(record)
    }
    /// Takes back the last move. Returns `false` when there is none.
    pub fn undo_move(&mut self) -> bool {
        self.try_undo().is_ok()
    }
}
impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        error::{EmptyUndo, MoveError},
        fen::Fen,
        game::GameState,
        outcome::Outcome,
        piece::PieceKind,
        player::Player,
        square::Square,
    };

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn game(fen: &str) -> GameState {
        GameState::from_board(fen.parse::<Fen>().unwrap().0)
    }
    fn square(square: &str) -> Square {
        square.parse().unwrap()
    }
    fn play(game: &mut GameState, moves: &[(&str, &str)]) {
        for (origin, destination) in moves {
            assert!(
                game.move_piece(square(origin), square(destination), true),
                "{origin}{destination} rejected"
            );
        }
    }

    #[test]
    fn move_then_undo_restores_everything() {
        let mut game = GameState::new();
        play(
            &mut game,
            &[("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("g8", "f6"), ("f1", "b5")],
        );
        assert_eq!(game.move_log().len(), 5);
        assert!(game.move_log()[2].is_capture());
        assert_eq!(game.whose_turn(), Player::Black);
        while game.undo_move() {}
        assert_eq!(game, GameState::new());
    }
    #[test]
    fn every_legal_move_round_trips() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            KIWIPETE,
            "4k3/1P6/8/3pP3/8/8/8/R3K2R w KQ d6 0 1",
        ] {
            let start = game(fen);
            for (origin, destination) in start.all_valid_moves() {
                let mut game = start.clone();
                assert!(game.move_piece(origin, destination, true));
                assert_ne!(game.board(), start.board());
                assert!(game.undo_move());
                assert_eq!(game, start, "{origin}{destination} on {fen}");
            }
        }
    }
    #[test]
    fn empty_undo() {
        let mut game = GameState::new();
        assert_eq!(game.try_undo(), Err(EmptyUndo));
        assert!(!game.undo_move());
        assert_eq!(game, GameState::new());
    }
    #[test]
    fn rejected_moves_leave_the_game_untouched() {
        let mut game = GameState::new();
        assert!(!game.move_piece(square("e2"), square("e5"), true));
        assert!(!game.move_piece(square("e1"), square("e2"), true));
        assert_eq!(
            game.try_move(square("e7"), square("e5"), None),
            Err(MoveError::InvalidSelection)
        );
        assert_eq!(
            game.try_move(square("e4"), square("e5"), None),
            Err(MoveError::InvalidSelection)
        );
        assert_eq!(
            game.try_move(square("b1"), square("b3"), None),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(
            game.try_move(square("e2"), square("e4"), Some(PieceKind::Queen)),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(game, GameState::new());
    }
    #[test]
    fn selection() {
        let game = GameState::new();
        assert!(game.is_valid_piece(1, 4));
        assert!(!game.is_valid_piece(6, 4));
        assert!(!game.is_valid_piece(3, 3));
        assert!(!game.is_valid_piece(8, 0));
        assert_eq!(game.get_piece(0, 4).unwrap().name(), "white_king");
        assert_eq!(game.get_piece(7, 3).unwrap().name(), "black_queen");
        assert_eq!(game.get_piece(4, 4), None);
        assert_eq!(game.get_piece(0, 8), None);
        assert!(game.get_valid_moves(square("e7")).is_empty());
        assert!(game.get_valid_moves(square("e4")).is_empty());
        assert!(game.get_valid_moves(Square { row: 9, col: 0 }).is_empty());
    }
    #[test]
    fn unvalidated_moves() {
        let mut game = game("4k3/4r3/8/8/8/8/4N3/R3K3 w - - 0 1");
        // the knight is pinned
        assert!(!game.move_piece(square("e2"), square("c3"), true));
        assert!(game.move_piece(square("e2"), square("c3"), false));
        assert!(game.undo_move());

        assert!(!game.move_piece(square("e7"), square("e2"), false));
        assert!(!game.move_piece(square("a1"), square("e1"), false));
        assert!(!game.move_piece(square("d4"), square("d5"), false));
        assert!(game.move_piece(square("a1"), square("a8"), false));
        assert!(!game.move_piece(square("e7"), square("e1"), false));
        assert!(game.move_piece(square("e7"), square("e2"), false));
    }
    #[test]
    fn unvalidated_castle_over_a_piece_is_refused() {
        let start = game("4k3/8/8/8/8/8/8/4KB1R w K - 0 1");
        let mut game = start.clone();
        assert!(!game.move_piece(square("e1"), square("g1"), false));
        assert_eq!(game, start);

        // with the way clear the rook comes along and undo puts both back
        let start = self::game("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mut game = start.clone();
        assert!(game.move_piece(square("e1"), square("g1"), false));
        assert_eq!(game.board()[square("f1")].unwrap().kind, PieceKind::Rook);
        assert!(game.undo_move());
        assert_eq!(game, start);
    }
    #[test]
    fn unvalidated_pawn_cannot_reach_its_own_back_rank() {
        let start = game("4k3/8/8/8/8/8/1P6/4K3 w - - 0 1");
        let mut game = start.clone();
        assert!(!game.move_piece(square("b2"), square("b1"), false));
        assert_eq!(game, start);

        let mut game = self::game("4k3/8/8/8/8/8/1p6/4K3 b - - 0 1");
        assert!(game.move_piece(square("b2"), square("b1"), false));
        assert_eq!(game.board()[square("b1")].unwrap().kind, PieceKind::Queen);
    }
    #[test]
    fn castling() {
        let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(game.king_can_castle_left(Player::White));
        assert!(game.king_can_castle_right(Player::White));
        assert!(game.get_valid_moves(square("e1")).contains(&square("g1")));
        play(&mut game, &[("e1", "g1")]);
        let record = game.move_log()[0];
        assert!(record.is_castling());
        let king = game.board()[square("g1")].unwrap();
        let rook = game.board()[square("f1")].unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved && rook.has_moved);
        assert!(game.board()[square("h1")].is_none());

        play(&mut game, &[("e8", "c8")]);
        assert_eq!(game.board()[square("d8")].unwrap().kind, PieceKind::Rook);
        assert!(game.board()[square("a8")].is_none());
    }
    #[test]
    fn castling_right_is_not_restored_by_returning() {
        let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        play(
            &mut game,
            &[("h1", "g1"), ("a8", "a7"), ("g1", "h1"), ("a7", "a8")],
        );
        assert!(!game.king_can_castle_right(Player::White));
        assert!(game.king_can_castle_left(Player::White));
        assert!(!game.king_can_castle_left(Player::Black));
        assert!(game.king_can_castle_right(Player::Black));
        assert!(!game.get_valid_moves(square("e1")).contains(&square("g1")));

        // taking back an unrelated move keeps the right revoked
        assert!(game.undo_move());
        assert!(!game.king_can_castle_left(Player::Black));
        assert!(game.undo_move());
        assert!(!game.king_can_castle_right(Player::White));

        assert!(game.undo_move());
        assert!(game.undo_move());
        assert!(game.king_can_castle_right(Player::White));
        assert!(game.king_can_castle_left(Player::Black));
    }
    #[test]
    fn promotion() {
        let mut game = game("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        assert!(!game.move_piece_with_promotion(square("e7"), square("e8"), PieceKind::King));
        assert!(!game.move_piece_with_promotion(square("e7"), square("e8"), PieceKind::Pawn));
        assert!(game.move_piece_with_promotion(square("e7"), square("e8"), PieceKind::Knight));
        assert_eq!(game.board()[square("e8")].unwrap().kind, PieceKind::Knight);
        assert_eq!(game.move_log()[0].to_string(), "e7e8n");
        assert!(game.undo_move());
        assert!(game.move_piece(square("e7"), square("e8"), true));
        assert_eq!(game.board()[square("e8")].unwrap().kind, PieceKind::Queen);
    }
    #[test]
    fn outcome_codes() {
        let mut game = GameState::new();
        assert_eq!(u8::from(game.checkmate_stalemate_checker()), Outcome::ONGOING);
        play(
            &mut game,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(game.is_in_check());
        assert_eq!(
            u8::from(game.checkmate_stalemate_checker()),
            Outcome::BLACK_WINS
        );
        assert!(game.all_valid_moves().is_empty());
        // the engine keeps answering queries after the game ended
        assert!(!game.get_valid_piece_moves(square("e1")).is_empty());

        let game = self::game("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1");
        let mut mated = game.clone();
        play(&mut mated, &[("d1", "d8")]);
        assert_eq!(
            u8::from(mated.checkmate_stalemate_checker()),
            Outcome::WHITE_WINS
        );

        let stalemate = self::game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!stalemate.is_in_check());
        assert_eq!(
            u8::from(stalemate.checkmate_stalemate_checker()),
            Outcome::STALEMATE
        );
    }
    #[test]
    fn queries_are_idempotent() {
        let game = game(KIWIPETE);
        for square in Square::all() {
            assert_eq!(game.get_valid_moves(square), game.get_valid_moves(square));
        }
        assert_eq!(game, self::game(KIWIPETE));
    }
    #[test]
    fn filtering_only_removes() {
        for fen in [
            KIWIPETE,
            "4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1",
            "4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1",
        ] {
            let game = game(fen);
            let board: &Board = game.board();
            for square in Square::all() {
                let pseudo_legal = game.get_valid_piece_moves(square);
                for destination in game.get_valid_moves(square) {
                    assert!(pseudo_legal.contains(&destination));
                }
                if let Some(piece) = board[square] {
                    for destination in pseudo_legal {
                        assert!(!board[destination].is_some_and(|other| other.player == piece.player));
                    }
                }
            }
        }
    }
    #[test]
    fn reset() {
        let mut game = game(KIWIPETE);
        play(&mut game, &[("e1", "c1")]);
        game.reset();
        assert_eq!(game, GameState::new());
        assert!(game.move_log().is_empty());
    }
}
