//! Tests for the exhaustive game tree and move selection.

use tictree_core::{
    Board, GameTree, Mark, Tally, available_moves, best_move, is_won_by, rank_moves,
};

/// Counts terminal games by walking every line of play with no sharing,
/// applying the same take-the-first-win policy as the tree.
fn brute_force(board: Board, mover: Mark) -> Tally {
    let moves = available_moves(&board);
    if moves.is_empty() {
        return Tally::tie();
    }
    let children: Vec<Board> = moves
        .iter()
        .map(|&cell| board.place(cell, mover).expect("empty square"))
        .collect();
    if children.iter().any(|next| is_won_by(next, mover)) {
        return Tally::win(mover);
    }
    children
        .into_iter()
        .map(|next| brute_force(next, mover.opponent()))
        .sum()
}

#[test]
fn test_root_tally_matches_reference() {
    let tree = GameTree::build();
    let tally = tree.root().tally();
    assert_eq!(tally, Tally::new(24_096, 12_432, 16_064));
    assert_eq!(tally.total(), 52_592);
}

#[test]
fn test_root_tally_matches_brute_force() {
    let tree = GameTree::build();
    assert_eq!(tree.root().tally(), brute_force(Board::new(), Mark::X));
}

#[test]
fn test_build_is_deterministic() {
    let first = GameTree::build();
    let second = GameTree::build();
    assert_eq!(first.len(), second.len());
    assert_eq!(first.root().tally(), second.root().tally());
    for node in first.nodes() {
        let twin = second.node(node.board()).expect("same positions");
        assert_eq!(node.tally(), twin.tally());
    }
}

#[test]
fn test_distinct_position_count() {
    assert_eq!(GameTree::build().len(), 5_208);
}

#[test]
fn test_node_tallies_sum_children() {
    let tree = GameTree::build();
    for node in tree.nodes() {
        if node.is_leaf() {
            assert_eq!(node.tally().total(), 1, "leaf {}", node.board().key());
            continue;
        }
        let children: Tally = node.edges().iter().map(|e| tree.child(e).tally()).sum();
        assert_eq!(node.tally(), children);
    }
}

#[test]
fn test_no_position_is_won_by_both() {
    let tree = GameTree::build();
    for node in tree.nodes() {
        assert!(!(is_won_by(node.board(), Mark::X) && is_won_by(node.board(), Mark::O)));
    }
}

#[test]
fn test_available_moves_properties_on_every_position() {
    let tree = GameTree::build();
    for node in tree.nodes() {
        let moves = available_moves(node.board());
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(moves.len(), 9 - node.board().occupied_count());
    }
}

#[test]
fn test_edges_follow_cell_order_and_alternate_marks() {
    let tree = GameTree::build();
    for node in tree.nodes() {
        assert!(node.edges().windows(2).all(|w| w[0].cell() < w[1].cell()));
        for edge in node.edges() {
            let child = tree.child(edge);
            let expected = node.board().place(edge.cell(), node.to_move()).unwrap();
            assert_eq!(child.board(), &expected);
        }
    }
}

#[test]
fn test_winning_move_is_sole_child() {
    let tree = GameTree::build();
    // X0 O3 X1 O4: X completes the top row at 2.
    let board: Board = "XX.OO....".parse().unwrap();
    let node = tree.node(&board).expect("reachable");
    assert_eq!(node.to_move(), Mark::X);
    assert_eq!(node.edges().len(), 1);
    assert_eq!(node.edges()[0].cell(), 2);
    assert_eq!(node.tally(), Tally::win(Mark::X));
    assert!(is_won_by(tree.child(&node.edges()[0]).board(), Mark::X));
}

#[test]
fn test_full_board_without_line_is_tie_leaf() {
    let tree = GameTree::build();
    let board: Board = "XOXXOOOXX".parse().unwrap();
    assert!(available_moves(&board).is_empty());
    assert!(!is_won_by(&board, Mark::X));
    assert!(!is_won_by(&board, Mark::O));
    let node = tree.node(&board).expect("reachable draw");
    assert!(node.is_leaf());
    assert_eq!(node.tally(), Tally::tie());
}

#[test]
fn test_reply_to_centre_opening() {
    let tree = GameTree::build();
    let board: Board = "....X....".parse().unwrap();
    let node = tree.node(&board).expect("reachable");
    assert_eq!(node.to_move(), Mark::O);
    assert_eq!(node.tally(), Tally::new(1_504, 608, 816));

    let choice = best_move(&tree, node).unwrap();
    assert_eq!(choice.cell(), 0);
    assert_eq!(choice.tally(), Tally::new(156, 66, 88));
    assert!((choice.fraction() - 66.0 / 310.0).abs() < 1e-12);

    for ranked in rank_moves(&tree, node) {
        assert!(ranked.fraction() <= choice.fraction());
        assert_eq!(ranked.fraction(), ranked.tally().win_fraction(Mark::O));
    }
}

#[test]
fn test_centre_is_best_opening() {
    let tree = GameTree::build();
    let choice = best_move(&tree, tree.root()).unwrap();
    assert_eq!(choice.cell(), 4);
    assert_eq!(choice.tally(), Tally::new(1_504, 608, 816));
}

#[test]
fn test_subtree_matches_full_tree() {
    let tree = GameTree::build();
    let board: Board = "X...O....".parse().unwrap();
    let subtree = GameTree::build_from(board).unwrap();
    assert_eq!(
        subtree.root().tally(),
        tree.node(&board).unwrap().tally()
    );
}
