use super::*;
use std::collections::BTreeSet;

/// Draws `count` new mine tiles inside `max_tile`, pairwise distinct and
/// disjoint from `existing`.
///
/// Candidates are drawn uniformly and rejected when they land on a tile that
/// already holds a mine. A board that cannot fit all the requested mines with
/// at least one safe tile left is rejected up front instead of looping.
pub fn populate<R>(
    count: TileCount,
    max_tile: Tile,
    existing: &[Tile],
    rng: &mut R,
) -> Result<Vec<Tile>>
where
    R: RandomSource + ?Sized,
{
    let occupied = existing
        .iter()
        .filter(|tile| tile.is_within(max_tile))
        .collect::<BTreeSet<_>>()
        .len();
    let requested = u64::from(count) + occupied as u64;
    let fits = mult(max_tile.row, max_tile.col).is_some_and(|total| requested < u64::from(total));
    if !fits {
        log::warn!(
            "Refusing to place {} mines next to {} existing on a {}x{} board",
            count,
            occupied,
            max_tile.row,
            max_tile.col
        );
        return Err(GameError::InvalidConfiguration {
            rows: max_tile.row,
            cols: max_tile.col,
            mines: requested.try_into().unwrap_or(TileCount::MAX),
        });
    }

    // both sides are positive here, so the conversions cannot fail
    let rows = usize::try_from(max_tile.row).unwrap_or_default();
    let cols = usize::try_from(max_tile.col).unwrap_or_default();

    let mut placed: Vec<Tile> = Vec::with_capacity(count as usize);
    let mut rejected = 0usize;
    while placed.len() < count as usize {
        let candidate = Tile::new(draw_coord(rng, rows), draw_coord(rng, cols));
        if mine_is_on_board(candidate, existing.iter().chain(&placed)) {
            rejected += 1;
            continue;
        }
        placed.push(candidate);
    }

    log::trace!("Placed {} mines with {} rejected draws", placed.len(), rejected);
    Ok(placed)
}

fn draw_coord<R: RandomSource + ?Sized>(rng: &mut R, upper: usize) -> Coord {
    // `upper` came from a positive `Coord`, so any index below it fits
    Coord::try_from(rng.next_in_range(upper)).unwrap_or_default()
}

/// Generation strategy that places every mine by uniform rejection sampling.
#[derive(Debug)]
pub struct RandomMinefieldGenerator<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> RandomMinefieldGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource + ?Sized> MinefieldGenerator for RandomMinefieldGenerator<'_, R> {
    fn generate(&mut self, config: GameConfig) -> Result<Vec<Tile>> {
        config.validate()?;
        populate(config.mines, config.max_tile(), &[], &mut *self.rng)
    }
}
