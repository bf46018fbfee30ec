//! Special characters offered for insertion at the caret.

/// A labelled row of the symbol picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolGroup {
    pub category: &'static str,
    pub items: &'static [&'static str],
}

pub const SYMBOLS: &[SymbolGroup] = &[
    SymbolGroup {
        category: "Comillas",
        items: &["«", "»", "“", "”", "‘", "’", "‹", "›"],
    },
    SymbolGroup {
        category: "Corchetes",
        items: &["【", "】", "〔", "〕", "《", "》", "〈", "〉"],
    },
    SymbolGroup {
        category: "Corazones",
        items: &["♥", "♡", "❤", "💕", "💗", "💖", "💘", "💞"],
    },
    SymbolGroup {
        category: "Estrellas",
        items: &["★", "☆", "✦", "✧", "✨", "⭐", "🌟", "💫"],
    },
    SymbolGroup {
        category: "Puntuación",
        items: &["…", "—", "–", "·", "•", "※", "†", "‡"],
    },
    SymbolGroup {
        category: "Japonés",
        items: &["〜", "～", "！", "？", "。", "、", "「", "」"],
    },
    SymbolGroup {
        category: "Varios",
        items: &["♪", "♫", "✿", "❀", "☾", "☽", "∞", "✉"],
    },
];

/// Cursor over [`SYMBOLS`]: a group and an item within it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolPicker {
    group: usize,
    item: usize,
}

impl SymbolPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> &'static SymbolGroup {
        &SYMBOLS[self.group]
    }

    /// Index of the highlighted item within [`Self::group`]
    pub fn item_index(&self) -> usize {
        self.item
    }

    pub fn selected(&self) -> &'static str {
        self.group().items[self.item]
    }

    /// Move within the group, wrapping at either end
    pub fn next_item(&mut self) {
        self.item = (self.item + 1) % self.group().items.len();
    }

    pub fn prev_item(&mut self) {
        let len = self.group().items.len();
        self.item = (self.item + len - 1) % len;
    }

    /// Move to the following group, keeping the column where it exists
    pub fn next_group(&mut self) {
        self.group = (self.group + 1) % SYMBOLS.len();
        self.clamp_item();
    }

    pub fn prev_group(&mut self) {
        self.group = (self.group + SYMBOLS.len() - 1) % SYMBOLS.len();
        self.clamp_item();
    }

    fn clamp_item(&mut self) {
        self.item = self.item.min(self.group().items.len() - 1);
    }
}
