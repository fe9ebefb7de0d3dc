// Scorum Client
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Betting types: sports, markets, wincases and odds.
//!
//! Every market has exactly two wincases. They sit next to each other in the wincase table with
//! the yes (or over) outcome at an even ordinal, so the opposite of a wincase is found by
//! flipping the lowest bit of its ordinal.
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::variant::OrdinalTable;
use crate::varint::Varint;

static_variant! {
    /// The kind of game a betting moderator creates.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub enum Sport: "sport", kind SportKind {
        Soccer = "soccer_game",
        Hockey = "hockey_game",
    }
}

static_variant! {
    /// A question bets can be placed on.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub enum Market: "market", kind MarketKind {
        ResultHome = "result_home",
        ResultDraw = "result_draw",
        ResultAway = "result_away",
        RoundHome = "round_home",
        Handicap { threshold: i16 } = "handicap",
        CorrectScoreHome = "correct_score_home",
        CorrectScoreDraw = "correct_score_draw",
        CorrectScoreAway = "correct_score_away",
        CorrectScore { home: i16, away: i16 } = "correct_score",
        GoalHome = "goal_home",
        GoalBoth = "goal_both",
        GoalAway = "goal_away",
        Total { threshold: i16 } = "total",
        TotalGoalsHome { threshold: i16 } = "total_goals_home",
        TotalGoalsAway { threshold: i16 } = "total_goals_away",
    }
}

static_variant! {
    /// One of the two outcomes of a [Market].
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub enum Wincase: "wincase", kind WincaseKind {
        ResultHomeYes = "result_home::yes",
        ResultHomeNo = "result_home::no",
        ResultDrawYes = "result_draw::yes",
        ResultDrawNo = "result_draw::no",
        ResultAwayYes = "result_away::yes",
        ResultAwayNo = "result_away::no",
        RoundHomeYes = "round_home::yes",
        RoundHomeNo = "round_home::no",
        HandicapOver { threshold: i16 } = "handicap::over",
        HandicapUnder { threshold: i16 } = "handicap::under",
        CorrectScoreHomeYes = "correct_score_home::yes",
        CorrectScoreHomeNo = "correct_score_home::no",
        CorrectScoreDrawYes = "correct_score_draw::yes",
        CorrectScoreDrawNo = "correct_score_draw::no",
        CorrectScoreAwayYes = "correct_score_away::yes",
        CorrectScoreAwayNo = "correct_score_away::no",
        CorrectScoreYes { home: i16, away: i16 } = "correct_score::yes",
        CorrectScoreNo { home: i16, away: i16 } = "correct_score::no",
        GoalHomeYes = "goal_home::yes",
        GoalHomeNo = "goal_home::no",
        GoalBothYes = "goal_both::yes",
        GoalBothNo = "goal_both::no",
        GoalAwayYes = "goal_away::yes",
        GoalAwayNo = "goal_away::no",
        TotalOver { threshold: i16 } = "total::over",
        TotalUnder { threshold: i16 } = "total::under",
        TotalGoalsHomeOver { threshold: i16 } = "total_goals_home::over",
        TotalGoalsHomeUnder { threshold: i16 } = "total_goals_home::under",
        TotalGoalsAwayOver { threshold: i16 } = "total_goals_away::over",
        TotalGoalsAwayUnder { threshold: i16 } = "total_goals_away::under",
    }
}

impl WincaseKind {
    /// The other outcome of the same market.
    pub fn opposite(self) -> WincaseKind {
        // The table has an even number of entries so the flipped ordinal always exists.
        Self::ALL[(self.ordinal() ^ 1) as usize]
    }

    pub fn market(self) -> MarketKind {
        MarketKind::ALL[(self.ordinal() / 2) as usize]
    }
}

impl MarketKind {
    /// The yes (or over) and the no (or under) outcome of the market.
    pub fn wincases(self) -> (WincaseKind, WincaseKind) {
        let first = (self.ordinal() * 2) as usize;
        (WincaseKind::ALL[first], WincaseKind::ALL[first + 1])
    }
}

/// Name of the opposite of the wincase called `name`.
///
/// ```rust
/// # use scorum_core::betting::opposite_name;
/// assert_eq!(opposite_name("total::over").unwrap(), "total::under");
/// ```
pub fn opposite_name(name: &str) -> Result<&'static str, Error> {
    Ok(WincaseKind::from_name(name)?.opposite().name())
}

impl Wincase {
    /// The other outcome of the same market with the same parameters.
    pub fn opposite(&self) -> Wincase {
        use Wincase::*;
        match *self {
            ResultHomeYes => ResultHomeNo,
            ResultHomeNo => ResultHomeYes,
            ResultDrawYes => ResultDrawNo,
            ResultDrawNo => ResultDrawYes,
            ResultAwayYes => ResultAwayNo,
            ResultAwayNo => ResultAwayYes,
            RoundHomeYes => RoundHomeNo,
            RoundHomeNo => RoundHomeYes,
            HandicapOver { threshold } => HandicapUnder { threshold },
            HandicapUnder { threshold } => HandicapOver { threshold },
            CorrectScoreHomeYes => CorrectScoreHomeNo,
            CorrectScoreHomeNo => CorrectScoreHomeYes,
            CorrectScoreDrawYes => CorrectScoreDrawNo,
            CorrectScoreDrawNo => CorrectScoreDrawYes,
            CorrectScoreAwayYes => CorrectScoreAwayNo,
            CorrectScoreAwayNo => CorrectScoreAwayYes,
            CorrectScoreYes { home, away } => CorrectScoreNo { home, away },
            CorrectScoreNo { home, away } => CorrectScoreYes { home, away },
            GoalHomeYes => GoalHomeNo,
            GoalHomeNo => GoalHomeYes,
            GoalBothYes => GoalBothNo,
            GoalBothNo => GoalBothYes,
            GoalAwayYes => GoalAwayNo,
            GoalAwayNo => GoalAwayYes,
            TotalOver { threshold } => TotalUnder { threshold },
            TotalUnder { threshold } => TotalOver { threshold },
            TotalGoalsHomeOver { threshold } => TotalGoalsHomeUnder { threshold },
            TotalGoalsHomeUnder { threshold } => TotalGoalsHomeOver { threshold },
            TotalGoalsAwayOver { threshold } => TotalGoalsAwayUnder { threshold },
            TotalGoalsAwayUnder { threshold } => TotalGoalsAwayOver { threshold },
        }
    }

    /// The market this wincase is an outcome of.
    pub fn market(&self) -> Market {
        use Wincase::*;
        match *self {
            ResultHomeYes | ResultHomeNo => Market::ResultHome,
            ResultDrawYes | ResultDrawNo => Market::ResultDraw,
            ResultAwayYes | ResultAwayNo => Market::ResultAway,
            RoundHomeYes | RoundHomeNo => Market::RoundHome,
            HandicapOver { threshold } | HandicapUnder { threshold } => {
                Market::Handicap { threshold }
            }
            CorrectScoreHomeYes | CorrectScoreHomeNo => Market::CorrectScoreHome,
            CorrectScoreDrawYes | CorrectScoreDrawNo => Market::CorrectScoreDraw,
            CorrectScoreAwayYes | CorrectScoreAwayNo => Market::CorrectScoreAway,
            CorrectScoreYes { home, away } | CorrectScoreNo { home, away } => {
                Market::CorrectScore { home, away }
            }
            GoalHomeYes | GoalHomeNo => Market::GoalHome,
            GoalBothYes | GoalBothNo => Market::GoalBoth,
            GoalAwayYes | GoalAwayNo => Market::GoalAway,
            TotalOver { threshold } | TotalUnder { threshold } => Market::Total { threshold },
            TotalGoalsHomeOver { threshold } | TotalGoalsHomeUnder { threshold } => {
                Market::TotalGoalsHome { threshold }
            }
            TotalGoalsAwayOver { threshold } | TotalGoalsAwayUnder { threshold } => {
                Market::TotalGoalsAway { threshold }
            }
        }
    }
}

impl Market {
    /// The yes (or over) and the no (or under) outcome of this market.
    pub fn wincases(&self) -> (Wincase, Wincase) {
        use Wincase::*;
        let yes = match *self {
            Market::ResultHome => ResultHomeYes,
            Market::ResultDraw => ResultDrawYes,
            Market::ResultAway => ResultAwayYes,
            Market::RoundHome => RoundHomeYes,
            Market::Handicap { threshold } => HandicapOver { threshold },
            Market::CorrectScoreHome => CorrectScoreHomeYes,
            Market::CorrectScoreDraw => CorrectScoreDrawYes,
            Market::CorrectScoreAway => CorrectScoreAwayYes,
            Market::CorrectScore { home, away } => CorrectScoreYes { home, away },
            Market::GoalHome => GoalHomeYes,
            Market::GoalBoth => GoalBothYes,
            Market::GoalAway => GoalAwayYes,
            Market::Total { threshold } => TotalOver { threshold },
            Market::TotalGoalsHome { threshold } => TotalGoalsHomeOver { threshold },
            Market::TotalGoalsAway { threshold } => TotalGoalsAwayOver { threshold },
        };
        (yes, yes.opposite())
    }
}

/// Odds of a bet as a fraction, encoded as two varints.
///
/// The JSON projection is the pair `[numerator, denominator]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Odds {
    pub numerator: u16,
    pub denominator: u16,
}

impl Odds {
    pub fn new(numerator: u16, denominator: u16) -> Self {
        Odds {
            numerator,
            denominator,
        }
    }
}

impl Encode for Odds {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        Varint::from(u32::from(self.numerator)).encode_to(dest);
        Varint::from(u32::from(self.denominator)).encode_to(dest);
    }
}

impl Decode for Odds {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        fn part<I: Input>(input: &mut I) -> Result<u16, CodecError> {
            let value = Varint::decode(input)?.0;
            u16::try_from(value).map_err(|_| CodecError::from("Odds part exceeds 16 bits."))
        }
        let numerator = part(input)?;
        let denominator = part(input)?;
        Ok(Odds::new(numerator, denominator))
    }
}

impl Serialize for Odds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.numerator, self.denominator).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Odds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (numerator, denominator) = <(u16, u16)>::deserialize(deserializer)?;
        Ok(Odds::new(numerator, denominator))
    }
}
