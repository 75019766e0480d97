/// Picks the glyph drawn at the left edge of a widget.
pub trait IconChooser {
	fn choose(&mut self, label: &str) -> String;
}

const KEYWORDS: &[(&str, &str)] = &[
	("schedule", "🕑"),
	("scheduling", "🕑"),
	("key", "🔑"),
	("file", "📄"),
	("metric", "📊"),
	("log", "📋"),
	("queue", "➡️"),
	("lambda", "🐑"),
	("processor", "⚙️"),
	("service", "⚙️"),
	("query", "📰"),
	("report", "📰"),
	(".js", "📜"),
	("message", "💬"),
	("table", "📋"),
	("cookie", "🍪"),
	("document", "📑"),
	("graph", "❄️"),
	("map", "🌍"),
	("satellite", "🛸"),
	("html", "📄"),
	("signal", "⚡️"),
	("hardwear", "🤖"),
	("notification", "🛎"),
	("alert", "🚨"),
	("prediction", "🔮"),
	("history", "👣"),
	("settings file", "📝"),
	("config file", "📝"),
	("request", "📡"),
];

const FALLBACKS: &[&str] = &[
	"🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🍒", "🍍", "🥥", "🥝", "🍅",
];

/// Cycles through a fixed list of choices.
#[derive(Clone, Debug, Default)]
pub struct RoundRobin {
	next: usize,
}

impl RoundRobin {
	pub fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
		let choice = choices[self.next % choices.len()];
		self.next += 1;
		choice
	}
}

/// Keyword lookup over the label; the keyword found furthest into the
/// label wins, later table entries winning ties.
#[derive(Clone, Debug, Default)]
pub struct KeywordIcons {
	fallback: RoundRobin,
}

impl KeywordIcons {
	pub fn lookup(label: &str) -> Option<&'static str> {
		let search = label.to_lowercase();
		let mut best: Option<(usize, &'static str)> = None;
		for (keyword, glyph) in KEYWORDS {
			if let Some(at) = search.find(*keyword) {
				if best.is_none_or(|(latest, _)| at >= latest) {
					best = Some((at, *glyph));
				}
			}
		}
		best.map(|(_, glyph)| glyph)
	}
}

impl IconChooser for KeywordIcons {
	fn choose(&mut self, label: &str) -> String {
		Self::lookup(label)
			.unwrap_or_else(|| self.fallback.pick(FALLBACKS))
			.to_owned()
	}
}
