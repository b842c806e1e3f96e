//! Structure of the precomputed move graph and canonical table over the full
//! valid state set.

use std::collections::HashSet;

use oxlearn::{
    BoardState, Error, GameTables, Player,
    tictactoe::{Cell, STATE_SPACE},
};

fn tables() -> &'static GameTables {
    GameTables::global()
}

#[test]
fn state_counts() {
    let graph = &tables().graph;
    let valid = graph.valid_states();
    assert_eq!(valid.len(), 6046);
    assert_eq!(valid.iter().filter(|s| s.is_terminal()).count(), 1526);
    assert_eq!(graph.edge_count(), 16167);
    assert_eq!(tables().canonical.class_count(), 850);
}

#[test]
fn reachable_boards_are_valid() {
    let graph = &tables().graph;
    let mut reachable = HashSet::from([BoardState::new()]);
    let mut frontier = vec![BoardState::new()];
    while let Some(board) = frontier.pop() {
        for position in board.legal_moves() {
            let next = board.make_move(position).unwrap();
            if reachable.insert(next) {
                frontier.push(next);
            }
        }
    }

    // the valid set also holds boards that play past a win
    assert!(reachable.iter().all(|&board| graph.contains(board)));
    assert_eq!(reachable.len(), 5478);
}

#[test]
fn valid_set_matches_piece_count_rule() {
    let graph = &tables().graph;
    let counted = (0..STATE_SPACE)
        .map(|encoded| BoardState::from_encoded(encoded).unwrap())
        .filter(BoardState::is_valid)
        .count();
    assert_eq!(counted, graph.valid_states().len());
    assert!(graph.valid_states().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn every_edge_places_one_mark_for_the_side_to_move() {
    let graph = &tables().graph;
    for &board in graph.valid_states() {
        let mover = board.to_move().to_cell();
        for edge in graph.successors(board) {
            assert!(board.is_empty(edge.position));
            assert_eq!(edge.board.get(edge.position), mover);
            let changed = (0..9)
                .filter(|&pos| edge.board.get(pos) != board.get(pos))
                .count();
            assert_eq!(changed, 1, "{board:?} -> {:?}", edge.board);
            assert_eq!(edge.board.undo_move(edge.position), Some(board));
            assert_eq!(graph.move_between(board, edge.board), Some(edge.position));
        }
    }
}

#[test]
fn terminal_boards_have_no_successors() {
    let graph = &tables().graph;
    for &board in graph.valid_states() {
        if board.is_terminal() {
            assert!(graph.successors(board).is_empty(), "{board:?}");
            assert!(board.legal_moves().is_empty());
        } else {
            assert_eq!(board.legal_moves(), board.empty_positions());
        }
    }
}

#[test]
fn winners_follow_line_ownership() {
    let graph = &tables().graph;
    let count = |player: Player| {
        graph
            .valid_states()
            .iter()
            .filter(|board| board.winner() == Some(player))
            .count()
    };
    assert_eq!(count(Player::O), 1020);
    assert_eq!(count(Player::X), 490);
}

#[test]
fn illegal_moves_are_rejected() {
    let board = BoardState::from_string("O........").unwrap();
    assert!(matches!(
        board.make_move(0),
        Err(Error::IllegalMove { position: 0, .. })
    ));
    assert!(matches!(
        board.make_move(9),
        Err(Error::InvalidPosition { position: 9 })
    ));

    let won = BoardState::from_string("OOOXX....").unwrap();
    assert!(won.is_terminal());
    assert_eq!(won.winner(), Some(Player::O));
    assert!(won.make_move(5).is_err());
}

#[test]
fn encoding_round_trips_through_cells() {
    for &board in tables().graph.valid_states() {
        assert_eq!(BoardState::from_cells(&board.cells()), board);
    }
    let cells = [
        Cell::X,
        Cell::Empty,
        Cell::O,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
    ];
    assert_eq!(BoardState::from_cells(&cells).encoded(), 2 + 9);
}

#[test]
fn representatives_are_orbit_minima() {
    let canonical = &tables().canonical;
    for representative in canonical.representatives() {
        let form = canonical.lookup(representative).unwrap();
        assert_eq!(form.canonical, representative);
        for g in oxlearn::Dihedral::all() {
            assert!(g.act_on_board(representative) >= representative);
        }
    }
}
