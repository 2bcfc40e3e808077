pub type Bitboard = u64;
pub type BoardSquare = u8;

pub trait BitboardExt {
    fn next_index(&self) -> BoardSquare;
    fn is_set(&self, index: BoardSquare) -> bool;
    fn print(&self, title: Option<&str>, position: Option<BoardSquare>);
    fn iter_positions(&self) -> BitboardIterator;
}

// used like this because we can't have a const fn as a trait,
// but we want to use it for the compile-time table calculation
pub const fn position_to_bitmask(x: u32, y: u32) -> u64 {
    1u64 << (x + y * 8)
}

impl BitboardExt for u64 {
    fn next_index(&self) -> BoardSquare {
        self.trailing_zeros() as BoardSquare
    }

    fn is_set(&self, index: BoardSquare) -> bool {
        self & (1 << index) != 0
    }

    fn print(&self, title: Option<&str>, position: Option<BoardSquare>) {
        if let Some(title_text) = title {
            log::debug!(
                "\x1b[97m{}{}\x1b[0m",
                " ".repeat((3 * 8usize).saturating_sub(title_text.len()) / 2),
                title_text
            );
        }

        for y in (0..8).rev() {
            let mut line = String::new();
            for x in 0..8 {
                let is_marked_position =
                    position.is_some_and(|b| b.get_x() == x && b.get_y() == y);

                line.push_str(
                    match (
                        position_to_bitmask(x as u32, y as u32) & self != 0,
                        is_marked_position,
                    ) {
                        (_, true) => "\x1b[93m ● \x1b[0m",
                        (true, false) => "\x1b[97m 1 \x1b[0m",
                        (false, false) => "\x1b[90m 0 \x1b[0m",
                    },
                );
            }
            log::debug!("{}", line);
        }
    }

    fn iter_positions(&self) -> BitboardIterator {
        BitboardIterator { remaining: *self }
    }
}

pub trait BoardSquareExt {
    fn get_x(&self) -> u8;
    fn get_y(&self) -> u8;
    fn parse(string: &str) -> Option<BoardSquare>;
    fn unparse(&self) -> String;
    fn from_position(x: u8, y: u8) -> BoardSquare;
    fn to_mask(&self) -> Bitboard;

    const E1: BoardSquare = 4;
    const E8: BoardSquare = 60;
}

impl BoardSquareExt for u8 {
    fn get_x(&self) -> u8 {
        self % 8
    }

    fn get_y(&self) -> u8 {
        self / 8
    }

    fn parse(string: &str) -> Option<BoardSquare> {
        let mut chars = string.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Some(
                BoardSquare::from_position(file as u8 - b'a', rank as u8 - b'1'),
            ),
            (_, _, _) => None,
        }
    }

    fn unparse(&self) -> String {
        format!(
            "{}{}",
            (self.get_x() + b'a') as char,
            (self.get_y() + b'1') as char
        )
    }

    fn from_position(x: u8, y: u8) -> BoardSquare {
        x + y * 8
    }

    fn to_mask(&self) -> Bitboard {
        1 << self
    }
}

pub struct BitboardIterator {
    remaining: u64,
}

impl Iterator for BitboardIterator {
    type Item = BoardSquare;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.remaining.trailing_zeros() as u8;
        self.remaining &= self.remaining - 1; // Clear the lowest set bit

        Some(index)
    }
}

/// Square index deltas, one per direction: north, south, west, east, south-east,
/// north-west, north-east, south-west. Rooks use the first four, bishops the last four.
pub const DIRECTION_OFFSETS: [i8; 8] = [8, -8, -1, 1, -7, 7, 9, -9];

pub const KNIGHT_OFFSETS: [i8; 8] = [-17, 17, -15, 15, -10, 10, 6, -6];

const fn min(a: u8, b: u8) -> u8 {
    if a < b { a } else { b }
}

const fn calculate_num_squares_to_edge() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];

    let mut square = 0;
    while square < 64 {
        let file = (square % 8) as u8;
        let rank = (square / 8) as u8;

        let north = 7 - rank;
        let south = rank;
        let west = file;
        let east = 7 - file;

        table[square] = [
            north,
            south,
            west,
            east,
            min(south, east),
            min(north, west),
            min(north, east),
            min(south, west),
        ];

        square += 1;
    }

    table
}

// each offset has to stay on the board and must not jump further than
// `max_delta` ranks or files, otherwise it wrapped around an edge
const fn calculate_offset_targets(offsets: &[i8], max_delta: i8) -> [Bitboard; 64] {
    let mut table = [0; 64];

    let mut square = 0;
    while square < 64 {
        let rank = (square / 8) as i8;
        let file = (square % 8) as i8;

        let mut i = 0;
        while i < offsets.len() {
            let target = square as i8 + offsets[i];

            if target >= 0 && target < 64 {
                let target_rank = target / 8;
                let target_file = target % 8;

                if (target_rank - rank).abs() <= max_delta
                    && (target_file - file).abs() <= max_delta
                {
                    table[square] |= 1u64 << target;
                }
            }

            i += 1;
        }

        square += 1;
    }

    table
}

pub const NUM_SQUARES_TO_EDGE: [[u8; 8]; 64] = calculate_num_squares_to_edge();
pub const KNIGHT_TARGETS: [Bitboard; 64] = calculate_offset_targets(&KNIGHT_OFFSETS, 2);
pub const KING_TARGETS: [Bitboard; 64] = calculate_offset_targets(&DIRECTION_OFFSETS, 1);

// squares a pawn of the given color attacks diagonally, indexed by color
pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    calculate_offset_targets(&[7, 9], 1),
    calculate_offset_targets(&[-7, -9], 1),
];
