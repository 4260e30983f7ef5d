use filler_table_adapter::{DataWindow, PlayerList, TableController};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const ROW_HEIGHT: f32 = 22.0;
const VIEWPORT_HEIGHT: f32 = 300.0;

fn main() -> Result<(), filler_table_adapter::AdapterError> {
    // Example: the player-list sample driven by a simulated 60 Hz frame loop.
    //
    // Every second the data churns (players leave/join, scores change). The table rows are
    // re-bound to the new entries and the controller keeps only the rows near the viewport
    // displayed while the user scrolls down the list.
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut players = PlayerList::generate(&mut rng, 2_000);
    let mut c = TableController::with_rows(VIEWPORT_HEIGHT, players.entries().len(), ROW_HEIGHT);
    c.settle(16)?;

    let mut now_ms = 0u64;
    let mut scroll = 0.0f32;
    while now_ms < 5_000 {
        now_ms += 16;
        if players.update(now_ms, &mut rng) {
            c.set_row_count(players.entries().len(), ROW_HEIGHT);
        }
        scroll = c.on_scroll(scroll + 37.0);
        c.settle(16)?;

        if now_ms % 1_008 == 0 {
            let tree = c.tree();
            let table = c.table();
            println!(
                "t={now_ms} scroll={scroll} rows={} displayed={} top={} bottom={}",
                tree.row_count(),
                tree.displayed_rows().count(),
                table.top_filler().len(),
                table.bottom_filler().len(),
            );
        }
    }

    players.set_search_query("player 1");
    println!("search {:?}: {} entries", players.search_query(), players.entries().len());
    let window = DataWindow::compute(0.0, 0.0, VIEWPORT_HEIGHT, ROW_HEIGHT, players.entries().len());
    for entry in window.slice(players.entries()).iter().take(5) {
        println!(
            "{:>16} score={:>3} ping={:>3} tag={} {}",
            entry.name, entry.score, entry.latency, entry.tag_name, entry.tag_color
        );
    }
    Ok(())
}
