use anyhow::{bail, Result};
use rustc_hash::FxHashSet;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Dir {North, East, South, West}

impl Dir {
    fn left(self) -> Dir {
        match self {Dir::North => Dir::West, Dir::West => Dir::South, Dir::South => Dir::East, Dir::East => Dir::North}
    }
    fn right(self) -> Dir {self.left().left().left()}
}

#[derive(Clone, Debug)]
struct Cart {x: usize, y: usize, dir: Dir, turns: u8, crashed: bool}

impl Cart {
    fn advance(&mut self, track: &[Vec<u8>]) -> Result<()> {
        match self.dir {
            Dir::North => self.y = self.y.wrapping_sub(1),
            Dir::South => self.y += 1,
            Dir::West => self.x = self.x.wrapping_sub(1),
            Dir::East => self.x += 1,
        }
        let piece = track.get(self.y).and_then(|row| row.get(self.x)).copied().unwrap_or(b' ');
        self.dir = match (piece, self.dir) {
            (b'/', Dir::North) | (b'\\', Dir::South) => Dir::East,
            (b'/', Dir::South) | (b'\\', Dir::North) => Dir::West,
            (b'/', Dir::East) | (b'\\', Dir::West) => Dir::North,
            (b'/', Dir::West) | (b'\\', Dir::East) => Dir::South,
            (b'+', dir) => {
                self.turns = (self.turns + 1) % 3;
                match self.turns {1 => dir.left(), 2 => dir, _ => dir.right()}
            }
            (b'|' | b'-', dir) => dir,
            _ => bail!("cart ran off the track at {},{}", self.x, self.y),
        };
        Ok(())
    }
}

fn parse(input: &str) -> (Vec<Vec<u8>>, Vec<Cart>) {
    let mut track = input.lines().map(|line| line.as_bytes().to_vec()).collect::<Vec<_>>();
    let mut carts = vec![];
    for (y, row) in track.iter_mut().enumerate() {
        for (x, c) in row.iter_mut().enumerate() {
            let (dir, under) = match *c {
                b'^' => (Dir::North, b'|'), b'v' => (Dir::South, b'|'),
                b'<' => (Dir::West, b'-'), b'>' => (Dir::East, b'-'),
                _ => continue,
            };
            *c = under;
            carts.push(Cart {x, y, dir, turns: 0, crashed: false});
        }
    }
    (track, carts)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (track, mut carts) = parse(input);
    // a repeated layout repeats forever
    let mut seen = FxHashSet::default();
    for tick in 0 .. {
        if carts.len() < 2 {
            match &carts[..] {
                [last] if part == 2 => return Ok(format!("{},{}", last.x, last.y)),
                _ => bail!("carts ran out without the expected crash"),
            }
        }
        carts.sort_unstable_by_key(|cart| (cart.y, cart.x));
        if !seen.insert(carts.iter().map(|c| (c.x, c.y, c.dir, c.turns)).collect::<Vec<_>>()) {
            debug!(tick, carts = carts.len(), "carts circle forever");
            bail!("carts never collide again");
        }
        for i in 0 .. carts.len() {
            if carts[i].crashed {continue}
            carts[i].advance(&track)?;
            let (x, y) = (carts[i].x, carts[i].y);
            if let Some(j) = (0 .. carts.len()).find(|&j| j != i && !carts[j].crashed && (carts[j].x, carts[j].y) == (x, y)) {
                if part == 1 {return Ok(format!("{},{}", x, y))}
                carts[i].crashed = true;
                carts[j].crashed = true;
            }
        }
        carts.retain(|cart| !cart.crashed);
    }
    unreachable!()
}
