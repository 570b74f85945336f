//! Movement rules backing the opt-in strict legality mode.
//!
//! Covers piece movement patterns, path obstruction, own-piece captures and
//! king safety. Castling and en passant are not generated because the engine
//! never performs them.

use super::{Board, Color, Game, MoveRequest, Piece, PieceType, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Squares `piece` standing on `from` could move to, ignoring king safety
pub fn pseudo_legal_targets(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
    let mut targets = Vec::new();
    match piece.piece_type {
        PieceType::Pawn => pawn_targets(board, from, piece.color, &mut targets),
        PieceType::Knight => step_targets(board, from, piece.color, &KNIGHT_OFFSETS, &mut targets),
        PieceType::King => step_targets(board, from, piece.color, &KING_OFFSETS, &mut targets),
        PieceType::Bishop => {
            slide_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets)
        }
        PieceType::Rook => slide_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets),
        PieceType::Queen => {
            slide_targets(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets);
            slide_targets(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets);
        }
    }
    targets
}

fn pawn_targets(board: &Board, from: Position, color: Color, targets: &mut Vec<Position>) {
    let (dir, start_rank) = match color {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    };

    if let Some(one_step) = from.offset(0, dir) {
        if board.get_piece(one_step).is_none() {
            targets.push(one_step);

            if from.rank == start_rank {
                if let Some(two_step) = from.offset(0, dir * 2) {
                    if board.get_piece(two_step).is_none() {
                        targets.push(two_step);
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        if let Some(target) = from.offset(file_delta, dir) {
            if board.get_piece(target).is_some_and(|p| p.color != color) {
                targets.push(target);
            }
        }
    }
}

fn step_targets(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Position>,
) {
    for &(df, dr) in offsets {
        if let Some(target) = from.offset(df, dr) {
            match board.get_piece(target) {
                Some(piece) if piece.color == color => {}
                _ => targets.push(target),
            }
        }
    }
}

fn slide_targets(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut Vec<Position>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match board.get_piece(next) {
                None => targets.push(next),
                Some(piece) => {
                    if piece.color != color {
                        targets.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Whether any piece of color `by` attacks `square`
pub fn is_square_attacked(board: &Board, square: Position, by: Color) -> bool {
    let pawn_rank_delta = match by {
        Color::White => -1,
        Color::Black => 1,
    };
    for file_delta in [-1, 1] {
        if let Some(source) = square.offset(file_delta, pawn_rank_delta) {
            if board.get_piece(source) == Some(Piece::new(PieceType::Pawn, by)) {
                return true;
            }
        }
    }

    let attacked_by_step = |offsets: &[(i8, i8)], piece_type: PieceType| {
        offsets.iter().any(|&(df, dr)| {
            square
                .offset(df, dr)
                .is_some_and(|source| board.get_piece(source) == Some(Piece::new(piece_type, by)))
        })
    };
    if attacked_by_step(&KNIGHT_OFFSETS[..], PieceType::Knight)
        || attacked_by_step(&KING_OFFSETS[..], PieceType::King)
    {
        return true;
    }

    let attacked_by_slide = |directions: &[(i8, i8)], sliders: [PieceType; 2]| {
        directions.iter().any(|&(df, dr)| {
            let mut current = square;
            while let Some(next) = current.offset(df, dr) {
                if let Some(piece) = board.get_piece(next) {
                    return piece.color == by && sliders.contains(&piece.piece_type);
                }
                current = next;
            }
            false
        })
    };
    attacked_by_slide(&BISHOP_DIRECTIONS[..], [PieceType::Bishop, PieceType::Queen])
        || attacked_by_slide(&ROOK_DIRECTIONS[..], [PieceType::Rook, PieceType::Queen])
}

/// Whether `color`'s king stands attacked. A side without a king is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// Check a move for `mover` against the movement rules.
/// Returns the reason on failure.
pub fn check_move(board: &Board, from: Position, to: Position, mover: Piece) -> Result<(), String> {
    if let Some(target) = board.get_piece(to) {
        if target.color == mover.color {
            return Err(format!("cannot capture own piece on {to}"));
        }
    }

    if !pseudo_legal_targets(board, from, mover).contains(&to) {
        return Err(format!(
            "{} on {from} cannot reach {to}",
            piece_name(mover.piece_type)
        ));
    }

    let mut after = board.clone();
    after.relocate(from, to);
    if is_king_attacked(&after, mover.color) {
        return Err("move leaves own king in check".to_string());
    }

    Ok(())
}

/// Every move the side to move may make under strict legality
pub fn generate_legal_moves(game: &Game) -> Vec<MoveRequest> {
    let board = game.board();
    let turn = game.turn();

    board
        .pieces()
        .filter(|(_, piece)| piece.color == turn)
        .flat_map(|(from, piece)| {
            pseudo_legal_targets(board, from, piece)
                .into_iter()
                .filter(move |&to| {
                    let mut after = board.clone();
                    after.relocate(from, to);
                    !is_king_attacked(&after, turn)
                })
                .map(move |to| MoveRequest::new(from, to))
        })
        .collect()
}

fn piece_name(piece_type: PieceType) -> &'static str {
    match piece_type {
        PieceType::Pawn => "pawn",
        PieceType::Rook => "rook",
        PieceType::Knight => "knight",
        PieceType::Bishop => "bishop",
        PieceType::Queen => "queen",
        PieceType::King => "king",
    }
}
