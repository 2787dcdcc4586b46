use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fianchetto::movegen::{is_cell_attacked, legal, pseudo_legal};
use fianchetto::{Board, Color, Coord};

static POSITIONS: [(&str, &str); 10] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    (
        "tangled",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
    ("wing_kings", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ("queens", "6k1/5qp1/7p/8/3Q4/6P1/5P1P/6K1 w - - 2 33"),
    ("rook_endgame", "1r4k1/5ppp/8/8/8/8/R4PPP/6K1 w - - 10 41"),
    ("pawn_wall", "4k3/8/pppppppp/8/8/PPPPPPPP/8/4K3 w - - 0 1"),
    ("promotion_race", "8/P6P/8/4k3/8/3K4/p6p/8 w - - 0 1"),
    ("knights", "4k3/8/2n2n2/8/2N2N2/8/8/4K3 w - - 5 20"),
    ("sliders", "r2q1rk1/8/8/8/8/8/8/R2Q1RK1 w - - 0 1"),
];

fn bench_gen_pseudo_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_pseudo_legal");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(pseudo_legal::gen_all(&board).len()))
        });
    }
    group.finish();
}

fn bench_gen_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_legal");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(legal::gen_all(&board).len()))
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        let moves = legal::gen_all(&board);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(mv.apply(&board).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_is_pseudo_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_pseudo_legal");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        let moves = pseudo_legal::gen_all(&board);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(mv.is_pseudo_legal(&board));
                }
            })
        });
    }
    group.finish();
}

fn bench_cell_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_attacked");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(is_cell_attacked(&board, coord, color));
                    }
                }
            })
        });
    }
    group.finish();
}

fn bench_king_attack(c: &mut Criterion) {
    let mut group = c.benchmark_group("king_attack");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(board.is_opponent_king_attacked()))
        });
    }
    group.finish();
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(board.has_legal_moves())));
    }
    group.finish();
}

fn bench_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("status");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(board.current_player().status()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_gen_pseudo_legal,
    bench_gen_legal,
    bench_apply,
    bench_is_pseudo_legal,
    bench_cell_attacked,
    bench_king_attack,
    bench_has_legal_moves,
    bench_status,
);

criterion_main!(benches);
