//! Games and small amusements: coin, dice, rps, ttt, uuid, calendar, age,
//! countdays.

use rand::Rng;
use rand::seq::SliceRandom;
use termfolio_platform::{SystemTime, day_of_week, days_from_civil, days_in_month};
use termfolio_types::error::Result;

use crate::context::Context;
use crate::games::{GameResult, Mark, RpsChoice, TicTacToe, play_round};
use crate::interpreter::{Command, CommandOutput};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar date as typed by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    fn today(now: &SystemTime) -> Self {
        Self {
            year: now.year,
            month: now.month,
            day: now.day,
        }
    }

    fn days(self) -> i64 {
        days_from_civil(i32::from(self.year), self.month, self.day)
    }
}

fn digits(text: &str, len: usize) -> Option<u16> {
    if text.len() == len && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Parse `YYYY-MM-DD` or `DD/MM/YYYY`. Impossible dates are rejected.
pub fn parse_date(text: &str) -> Option<Date> {
    let dashed: Vec<&str> = text.split('-').collect();
    let slashed: Vec<&str> = text.split('/').collect();
    let (year, month, day) = match (dashed.as_slice(), slashed.as_slice()) {
        ([y, m, d], _) => (digits(y, 4)?, digits(m, 2)?, digits(d, 2)?),
        (_, [d, m, y]) => (digits(y, 4)?, digits(m, 2)?, digits(d, 2)?),
        _ => return None,
    };
    let month = u8::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
    let day = u8::try_from(day)
        .ok()
        .filter(|d| *d >= 1 && *d <= days_in_month(year, month))?;
    Some(Date { year, month, day })
}

/// Whole years between two dates, in either order.
pub fn years_between(a: Date, b: Date) -> u16 {
    let (early, late) = if a <= b { (a, b) } else { (b, a) };
    let mut years = late.year - early.year;
    if (late.month, late.day) < (early.month, early.day) {
        years -= 1;
    }
    years
}

/// Month grid under a title line, weeks starting on Sunday.
pub fn render_calendar(year: u16, month: u8) -> String {
    let name = MONTH_NAMES[usize::from(month - 1)];
    let mut lines = vec![format!("   {name} {year}"), "Su Mo Tu We Th Fr Sa".to_string()];

    let first = usize::from(day_of_week(i32::from(year), month, 1));
    let mut row = "   ".repeat(first);
    let mut column = first;
    for day in 1..=days_in_month(year, month) {
        row.push_str(&format!("{day:>2} "));
        column += 1;
        if column == 7 {
            lines.push(row.trim_end().to_string());
            row.clear();
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// coin / dice
// ---------------------------------------------------------------------------

struct CoinCmd;
impl Command for CoinCmd {
    fn name(&self) -> &str {
        "coin"
    }
    fn description(&self) -> &str {
        "Flip a virtual coin."
    }
    fn usage(&self) -> &str {
        "coin"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let face = if ctx.rng.gen_bool(0.5) { "Heads" } else { "Tails" };
        Ok(CommandOutput::Text(format!("{face} 🪙")))
    }
}

struct DiceCmd;
impl Command for DiceCmd {
    fn name(&self) -> &str {
        "dice"
    }
    fn description(&self) -> &str {
        "Roll a virtual dice."
    }
    fn usage(&self) -> &str {
        "dice [sides]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let sides = match args.first() {
            Some(arg) => match arg.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Ok(CommandOutput::text("Invalid number of sides.")),
            },
            None => 6,
        };
        let roll = ctx.rng.gen_range(1..=sides);
        Ok(CommandOutput::Text(format!(
            "Rolled a {sides}-sided die: {roll} 🎲"
        )))
    }
}

// ---------------------------------------------------------------------------
// rps
// ---------------------------------------------------------------------------

/// The AI's pick for one round.
pub fn ai_choice<R: Rng + ?Sized>(rng: &mut R) -> RpsChoice {
    RpsChoice::ALL
        .choose(rng)
        .copied()
        .unwrap_or(RpsChoice::Rock)
}

struct RpsCmd;
impl Command for RpsCmd {
    fn name(&self) -> &str {
        "rps"
    }
    fn description(&self) -> &str {
        "Play Rock, Paper, Scissors."
    }
    fn usage(&self) -> &str {
        "rps [rock|paper|scissors]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(player) = args.first().and_then(|a| a.parse::<RpsChoice>().ok()) else {
            return Ok(CommandOutput::Text(format!(
                "Usage: rps [rock|paper|scissors]. Current score: {}",
                ctx.state.rps
            )));
        };
        let ai = ai_choice(&mut *ctx.rng);
        let outcome = play_round(player, ai);

        let mut score = ctx.state.rps;
        score.record(outcome);
        ctx.state.rps = score;

        Ok(CommandOutput::Text(format!(
            "You chose {player}, AI chose {ai}. {} Score: {score}",
            outcome.message()
        )))
    }
}

// ---------------------------------------------------------------------------
// ttt
// ---------------------------------------------------------------------------

fn with_board(message: &str, game: &TicTacToe) -> CommandOutput {
    CommandOutput::Preformatted(format!("{message}\n{}", game.render()))
}

fn game_over(result: GameResult) -> String {
    let outcome = match result {
        GameResult::Winner(mark) => format!("{mark} wins!"),
        GameResult::Tie => "It's a tie.".to_string(),
    };
    format!("Game over. {outcome} Type 'ttt reset' to play again.")
}

fn result_message(result: GameResult) -> String {
    match result {
        GameResult::Winner(mark) => format!("Player {mark} wins!"),
        GameResult::Tie => "It's a tie!".to_string(),
    }
}

struct TttCmd;
impl Command for TttCmd {
    fn name(&self) -> &str {
        "ttt"
    }
    fn description(&self) -> &str {
        "Play Tic-Tac-Toe against the computer."
    }
    fn usage(&self) -> &str {
        "ttt [1-9|reset]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if args.first() == Some(&"reset") {
            ctx.state.ttt = TicTacToe::new();
            return Ok(with_board(
                "New game started. Player X's turn.",
                &ctx.state.ttt,
            ));
        }

        let mut game = ctx.state.ttt.clone();
        if let Some(result) = game.result() {
            return Ok(CommandOutput::Text(game_over(result)));
        }

        let human = game.turn();
        let cell = args
            .first()
            .and_then(|a| a.parse::<usize>().ok())
            .filter(|n| (1..=9).contains(n))
            .map(|n| n - 1);
        let placed = cell.is_some_and(|i| game.place(i, human));
        if !placed {
            return Ok(with_board(
                &format!("Invalid move. Player {human}'s turn. Choose an empty spot (1-9)."),
                &game,
            ));
        }

        let message = match game.result() {
            Some(result) => result_message(result),
            None => {
                if let Some(&spot) = game.empty_cells().choose(&mut *ctx.rng) {
                    game.place(spot, Mark::O);
                }
                match game.result() {
                    Some(result) => result_message(result),
                    None => format!("Player {human}'s turn."),
                }
            },
        };
        let output = with_board(&message, &game);
        ctx.state.ttt = game;
        Ok(output)
    }
}

// ---------------------------------------------------------------------------
// uuid
// ---------------------------------------------------------------------------

struct UuidCmd;
impl Command for UuidCmd {
    fn name(&self) -> &str {
        "uuid"
    }
    fn description(&self) -> &str {
        "Generate a random UUID."
    }
    fn usage(&self) -> &str {
        "uuid"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let mut bytes = [0u8; 16];
        ctx.rng.fill(&mut bytes);
        // Version 4, RFC 4122 variant.
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Ok(CommandOutput::Text(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )))
    }
}

// ---------------------------------------------------------------------------
// calendar
// ---------------------------------------------------------------------------

struct CalendarCmd;
impl Command for CalendarCmd {
    fn name(&self) -> &str {
        "calendar"
    }
    fn description(&self) -> &str {
        "Display a calendar for the current month or a specified month/year."
    }
    fn usage(&self) -> &str {
        "calendar [month[/year]]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let now = ctx.now();
        let (mut year, mut month) = (now.year, now.month);
        if let Some(arg) = args.first() {
            let (m, y) = match arg.split_once('/') {
                Some((m, y)) => (m, Some(y)),
                None => (*arg, None),
            };
            let parsed_month = m.parse::<u8>().ok().filter(|m| (1..=12).contains(m));
            let parsed_year = match y {
                Some(y) => y.parse::<u16>().ok().filter(|y| *y >= 1).map(Some),
                None => Some(None),
            };
            match (parsed_month, parsed_year) {
                (Some(m), Some(y)) => {
                    month = m;
                    year = y.unwrap_or(year);
                },
                _ => return Ok(CommandOutput::text("Usage: calendar [month[/year]]")),
            }
        }
        Ok(CommandOutput::Preformatted(render_calendar(year, month)))
    }
}

// ---------------------------------------------------------------------------
// age / countdays
// ---------------------------------------------------------------------------

struct AgeCmd;
impl Command for AgeCmd {
    fn name(&self) -> &str {
        "age"
    }
    fn description(&self) -> &str {
        "Calculate age from a given date."
    }
    fn usage(&self) -> &str {
        "age [YYYY-MM-DD|DD/MM/YYYY]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Ok(CommandOutput::text("Usage: age [YYYY-MM-DD|DD/MM/YYYY]"));
        };
        let Some(born) = parse_date(arg) else {
            return Ok(CommandOutput::text(
                "Invalid date format. Use YYYY-MM-DD or DD/MM/YYYY.",
            ));
        };
        let years = years_between(born, Date::today(&ctx.now()));
        Ok(CommandOutput::Text(format!("You are {years} years old.")))
    }
}

struct CountdaysCmd;
impl Command for CountdaysCmd {
    fn name(&self) -> &str {
        "countdays"
    }
    fn description(&self) -> &str {
        "Count days from today to a specific date."
    }
    fn usage(&self) -> &str {
        "countdays [YYYY-MM-DD|DD/MM/YYYY]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Ok(CommandOutput::text(
                "Usage: countdays [YYYY-MM-DD|DD/MM/YYYY]",
            ));
        };
        let Some(target) = parse_date(arg) else {
            return Ok(CommandOutput::text("Invalid date format."));
        };
        let diff = target.days() - Date::today(&ctx.now()).days();
        let text = match diff {
            d if d > 0 => format!("{d} days until {arg}."),
            d if d < 0 => format!("{} days since {arg}.", -d),
            _ => format!("Today is {arg}!"),
        };
        Ok(CommandOutput::Text(text))
    }
}

/// Register games and amusements.
pub fn register_fun_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(CoinCmd));
    reg.register(Box::new(DiceCmd));
    reg.register(Box::new(RpsCmd));
    reg.register(Box::new(TttCmd));
    reg.register(Box::new(UuidCmd));
    reg.register(Box::new(CalendarCmd));
    reg.register(Box::new(AgeCmd));
    reg.register(Box::new(CountdaysCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::RpsScore;
    use crate::settings::keys;
    use crate::testing::Harness;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use termfolio_platform::load_json;

    fn date(year: u16, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    #[test]
    fn parse_both_formats() {
        assert_eq!(parse_date("2000-02-29"), Some(date(2000, 2, 29)));
        assert_eq!(parse_date("31/12/1999"), Some(date(1999, 12, 31)));
    }

    #[test]
    fn parse_rejects_bad_shapes_and_impossible_dates() {
        for bad in [
            "2001-02-29",
            "2000-13-01",
            "2000-1-01",
            "1/1/2000",
            "2000/01/01",
            "00/01/2000",
            "tomorrow",
            "",
        ] {
            assert_eq!(parse_date(bad), None, "{bad}");
        }
    }

    #[test]
    fn years_between_counts_whole_years() {
        let today = date(2025, 1, 15);
        assert_eq!(years_between(date(2000, 1, 15), today), 25);
        assert_eq!(years_between(date(2000, 1, 16), today), 24);
        assert_eq!(years_between(date(2030, 6, 1), today), 5);
    }

    #[test]
    fn coin_lands_on_a_face() {
        let mut h = Harness::new();
        for _ in 0..10 {
            let text = h.text("coin");
            assert!(text == "Heads 🪙" || text == "Tails 🪙", "{text}");
        }
    }

    #[test]
    fn dice_stays_in_range() {
        let mut h = Harness::new();
        for _ in 0..20 {
            let text = h.text("dice 3");
            let roll: u32 = text
                .trim_start_matches("Rolled a 3-sided die: ")
                .trim_end_matches(" 🎲")
                .parse()
                .unwrap();
            assert!((1..=3).contains(&roll));
        }
        assert!(h.text("dice").starts_with("Rolled a 6-sided die: "));
        assert_eq!(h.text("dice 0"), "Invalid number of sides.");
        assert_eq!(h.text("dice many"), "Invalid number of sides.");
    }

    #[test]
    fn rps_updates_score() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("rps"),
            "Usage: rps [rock|paper|scissors]. Current score: Player 0 - AI 0"
        );
        for _ in 0..5 {
            let text = h.text("rps Rock");
            assert!(text.starts_with("You chose rock, AI chose "), "{text}");
            let score = h.session.state().rps;
            assert!(text.ends_with(&format!("Score: {score}")));
        }
        let score = h.session.state().rps;
        assert!(score.player + score.ai <= 5);
    }

    /// The first seed whose opening AI pick is `wanted`.
    fn seed_for(wanted: RpsChoice) -> u64 {
        (0..1_000)
            .find(|&seed| ai_choice(&mut StdRng::seed_from_u64(seed)) == wanted)
            .unwrap()
    }

    fn beater(ai: RpsChoice) -> RpsChoice {
        RpsChoice::ALL.into_iter().find(|c| c.beats(ai)).unwrap()
    }

    #[test]
    fn rps_rock_beats_scissors_and_score_survives_restart() {
        let seed = seed_for(RpsChoice::Scissors);
        let mut h = Harness::new();
        h.session.seed_rng(seed);
        let mut mirror = StdRng::seed_from_u64(seed);
        assert_eq!(ai_choice(&mut mirror), RpsChoice::Scissors);

        assert_eq!(
            h.text("rps rock"),
            "You chose rock, AI chose scissors. You win! Score: Player 1 - AI 0"
        );
        assert_eq!(h.session.state().rps, RpsScore { player: 1, ai: 0 });

        let ai = ai_choice(&mut mirror);
        h.run(&format!("rps {}", beater(ai)));
        assert_eq!(h.session.state().rps, RpsScore { player: 2, ai: 0 });

        let ai = ai_choice(&mut mirror);
        h.run(&format!("rps {}", beater(beater(ai))));
        assert_eq!(h.session.state().rps, RpsScore { player: 2, ai: 1 });

        let ai = ai_choice(&mut mirror);
        assert!(h.text(&format!("rps {ai}")).contains("It's a tie!"));
        assert_eq!(h.session.state().rps, RpsScore { player: 2, ai: 1 });

        let stored: RpsScore = load_json(h.session.store(), keys::RPS_SCORE).unwrap();
        assert_eq!(stored, RpsScore { player: 2, ai: 1 });
        let restored = h.restart();
        assert_eq!(restored.state().rps, RpsScore { player: 2, ai: 1 });
    }

    #[test]
    fn rps_rejects_unknown_choice_without_scoring() {
        let mut h = Harness::new();
        h.text("rps lizard");
        assert_eq!(h.session.state().rps, RpsScore::default());
    }

    #[test]
    fn ttt_first_move_places_two_marks() {
        let mut h = Harness::new();
        let text = h.text("ttt 5");
        assert!(text.starts_with("Player X's turn.\n"), "{text}");
        let game = &h.session.state().ttt;
        assert_eq!(game.cell(4), Some(Mark::X));
        assert_eq!(game.filled(), 2);
    }

    #[test]
    fn ttt_rejects_bad_moves_without_changing_board() {
        let mut h = Harness::new();
        h.run("ttt 1");
        let before = h.session.state().ttt.clone();
        for line in ["ttt 1", "ttt 0", "ttt 10", "ttt x", "ttt"] {
            let text = h.text(line);
            assert!(
                text.starts_with("Invalid move. Player X's turn. Choose an empty spot (1-9).\n"),
                "{line}: {text}"
            );
        }
        assert_eq!(h.session.state().ttt, before);
    }

    #[test]
    fn ttt_plays_to_completion_then_reports_game_over() {
        let mut h = Harness::new();
        let mut last = String::new();
        while h.session.state().ttt.result().is_none() {
            let spot = h.session.state().ttt.empty_cells()[0] + 1;
            last = h.text(&format!("ttt {spot}"));
        }
        let result = h.session.state().ttt.result().unwrap();
        assert!(last.starts_with(&result_message(result)), "{last}");
        assert_eq!(h.text("ttt 1"), game_over(result));
    }

    #[test]
    fn ttt_reset_clears_board() {
        let mut h = Harness::new();
        h.run("ttt 5");
        assert_eq!(
            h.text("ttt reset"),
            "New game started. Player X's turn.\n1|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9"
        );
        assert_eq!(h.session.state().ttt.filled(), 0);
    }

    #[test]
    fn game_over_wording() {
        assert_eq!(
            game_over(GameResult::Winner(Mark::O)),
            "Game over. O wins! Type 'ttt reset' to play again."
        );
        assert_eq!(
            game_over(GameResult::Tie),
            "Game over. It's a tie. Type 'ttt reset' to play again."
        );
    }

    #[test]
    fn uuid_is_version_4() {
        let mut h = Harness::new();
        let id = h.text("uuid");
        let groups: Vec<&str> = id.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            [8, 4, 4, 4, 12]
        );
        assert!(groups[2].starts_with('4'));
        assert!(matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b')));
        assert_ne!(h.text("uuid"), id);
    }

    #[test]
    fn calendar_for_current_month() {
        let mut h = Harness::new();
        let expected = [
            "   January 2025",
            "Su Mo Tu We Th Fr Sa",
            "          1  2  3  4",
            " 5  6  7  8  9 10 11",
            "12 13 14 15 16 17 18",
            "19 20 21 22 23 24 25",
            "26 27 28 29 30 31",
        ];
        assert_eq!(h.text("calendar"), expected.join("\n"));
    }

    #[test]
    fn calendar_for_given_month() {
        let mut h = Harness::new();
        let text = h.text("calendar 2/2024");
        assert!(text.starts_with("   February 2024\n"));
        assert!(text.ends_with("25 26 27 28 29"));
        assert!(h.text("calendar 6").starts_with("   June 2025\n"));
        assert_eq!(h.text("calendar 13"), "Usage: calendar [month[/year]]");
        assert_eq!(h.text("calendar 1/x"), "Usage: calendar [month[/year]]");
    }

    #[test]
    fn age_from_either_format() {
        let mut h = Harness::new();
        assert_eq!(h.text("age 2000-01-15"), "You are 25 years old.");
        assert_eq!(h.text("age 16/01/2000"), "You are 24 years old.");
        assert_eq!(h.text("age"), "Usage: age [YYYY-MM-DD|DD/MM/YYYY]");
        assert_eq!(
            h.text("age 2000-02-30"),
            "Invalid date format. Use YYYY-MM-DD or DD/MM/YYYY."
        );
    }

    #[test]
    fn countdays_relative_to_today() {
        let mut h = Harness::new();
        assert_eq!(h.text("countdays 2025-01-25"), "10 days until 2025-01-25.");
        assert_eq!(h.text("countdays 14/01/2025"), "1 days since 14/01/2025.");
        assert_eq!(h.text("countdays 2025-01-15"), "Today is 2025-01-15!");
        assert_eq!(h.text("countdays soon"), "Invalid date format.");
        assert_eq!(
            h.text("countdays"),
            "Usage: countdays [YYYY-MM-DD|DD/MM/YYYY]"
        );
    }
}
