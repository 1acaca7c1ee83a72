// src/render.rs
//! 纯文本地图快照
use dungeon::{ContentKind, DungeonGraph, DungeonStats};
use hero::Explorer;

const EXPLORER: char = '@';
const VISITED_EMPTY: char = '#';
const UNVISITED: char = '?';
const NO_ROOM: char = ' ';

fn kind_glyph(kind: ContentKind) -> char {
    match kind {
        ContentKind::Boss => 'B',
        ContentKind::Monster => 'M',
        ContentKind::Treasure => 'T',
        ContentKind::Event => 'E',
    }
}

/// One line per map row, top row first. Reads state only.
pub fn map_snapshot(graph: &DungeonGraph, explorer: &Explorer) -> String {
    let mut rows = Vec::with_capacity(graph.height() as usize);
    for y in 0..graph.height() {
        let row: String = (0..graph.width())
            .map(|x| {
                if explorer.position() == (x, y) {
                    return EXPLORER;
                }
                match graph.room((x, y)) {
                    None => NO_ROOM,
                    Some(room) if !room.visited => UNVISITED,
                    Some(room) => room
                        .content
                        .as_ref()
                        .map_or(VISITED_EMPTY, |c| kind_glyph(c.kind())),
                }
            })
            .collect();
        rows.push(row);
    }
    rows.join("\n")
}

pub fn stats_report(stats: &DungeonStats) -> String {
    let mut lines = vec![format!("Rooms: {}", stats.total_rooms)];
    for (kind, count) in &stats.content {
        lines.push(format!("  {:<9}{}", kind, count));
    }
    lines.push(format!(
        "Average connections: {:.2}",
        stats.average_connections
    ));
    lines.join("\n")
}
