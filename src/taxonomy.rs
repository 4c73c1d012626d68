//! Static line-item taxonomy for statement classification.
//!
//! Each line item carries an ordered keyword list matched case-insensitively
//! as substrings against ledger account names, plus its sign treatment.
//! Keyword lists mix Korean account-name fragments with their English
//! equivalents; ERP charts of accounts use either depending on logon
//! language. Substring matching means short fragments can hit unrelated
//! accounts (e.g. "상품" inside "상품매출"), an accepted limitation of this
//! classification, see DESIGN.md.

use serde::{Deserialize, Serialize};

/// How a line item's matched balance is stored in the statement.
///
/// `Natural` keeps `debit - credit` as-is, so credit-heavy items (payables,
/// equity) carry negative amounts. `Absolute` is applied only to revenue
/// items, which are reported as positive totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Natural,
    Absolute,
}

/// Whether a row matching several keywords of one line item is summed once
/// per keyword (the inherited default, which can double-count) or at most
/// once per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    #[default]
    SumPerKeyword,
    FirstMatchWins,
}

impl MatchPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sum-per-keyword" => Some(Self::SumPerKeyword),
            "first-match-wins" => Some(Self::FirstMatchWins),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SumPerKeyword => "sum-per-keyword",
            Self::FirstMatchWins => "first-match-wins",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LineItem {
    pub name: &'static str,
    /// Lowercase fragments, matched against the lowercased account name.
    pub keywords: &'static [&'static str],
    pub sign: Sign,
}

/// A statement hierarchy: groups of groups, line items at the leaves.
#[derive(Debug, Clone, Copy)]
pub enum TaxonomyNode {
    Branch(&'static str, &'static [TaxonomyNode]),
    Item(LineItem),
}

const fn item(
    name: &'static str,
    keywords: &'static [&'static str],
    sign: Sign,
) -> TaxonomyNode {
    TaxonomyNode::Item(LineItem {
        name,
        keywords,
        sign,
    })
}

pub const BALANCE_SHEET: &[TaxonomyNode] = &[
    TaxonomyNode::Branch(
        "Assets",
        &[
            TaxonomyNode::Branch(
                "Current assets",
                &[
                    item(
                        "Cash and cash equivalents",
                        &["cash", "deposit", "현금", "보통예금", "당좌예금"],
                        Sign::Natural,
                    ),
                    item(
                        "Trade receivables",
                        &["receivable", "매출채권", "받을어음"],
                        Sign::Natural,
                    ),
                    item(
                        "Inventories",
                        &["inventory", "inventories", "merchandise", "재고자산", "상품", "제품", "원재료"],
                        Sign::Natural,
                    ),
                ],
            ),
            TaxonomyNode::Branch(
                "Non-current assets",
                &[
                    item(
                        "Tangible assets",
                        &["land", "building", "machinery", "vehicle", "fixture", "토지", "건물", "기계장치", "차량운반구", "비품"],
                        Sign::Natural,
                    ),
                    item(
                        "Intangible assets",
                        &["goodwill", "patent", "software", "영업권", "특허권", "소프트웨어"],
                        Sign::Natural,
                    ),
                ],
            ),
        ],
    ),
    TaxonomyNode::Branch(
        "Liabilities",
        &[
            TaxonomyNode::Branch(
                "Current liabilities",
                &[
                    item(
                        "Trade payables",
                        &["payable", "매입채무", "지급어음"],
                        Sign::Natural,
                    ),
                    item(
                        "Short-term borrowings",
                        &["short-term borrowing", "short-term loan", "단기차입금", "운전자금대출"],
                        Sign::Natural,
                    ),
                    item(
                        "Accrued liabilities",
                        &["accrued", "미지급금", "미지급비용"],
                        Sign::Natural,
                    ),
                ],
            ),
            TaxonomyNode::Branch(
                "Non-current liabilities",
                &[item(
                    "Long-term borrowings",
                    &["long-term borrowing", "debenture", "장기차입금", "사채"],
                    Sign::Natural,
                )],
            ),
        ],
    ),
    TaxonomyNode::Branch(
        "Equity",
        &[
            item(
                "Capital stock",
                &["capital stock", "paid-in capital", "자본금", "출자금"],
                Sign::Natural,
            ),
            item(
                "Retained earnings",
                &["retained earning", "이익잉여금", "미처분이익잉여금"],
                Sign::Natural,
            ),
            item("Net income", &["net income", "당기순이익"], Sign::Natural),
        ],
    ),
];

pub const INCOME_STATEMENT: &[TaxonomyNode] = &[
    TaxonomyNode::Branch(
        "Revenue",
        &[
            item(
                "Sales",
                &["sales", "매출", "상품매출", "제품매출"],
                Sign::Absolute,
            ),
            item(
                "Other income",
                &["interest income", "rental income", "miscellaneous income", "잡수익", "이자수익", "임대수익"],
                Sign::Absolute,
            ),
        ],
    ),
    TaxonomyNode::Branch(
        "Expenses",
        &[
            item(
                "Cost of goods sold",
                &["cogs", "cost of goods", "매출원가", "상품매출원가"],
                Sign::Natural,
            ),
            TaxonomyNode::Branch(
                "Selling & admin",
                &[
                    item(
                        "Wages",
                        &["salary", "salaries", "wage", "급여", "임금"],
                        Sign::Natural,
                    ),
                    item("Rent", &["rent", "임차료", "지급임차료"], Sign::Natural),
                    item(
                        "Depreciation",
                        &["depreciation", "감가상각비"],
                        Sign::Natural,
                    ),
                    item(
                        "Other SG&A",
                        &["advertising", "entertainment", "communication", "광고선전비", "접대비", "통신비"],
                        Sign::Natural,
                    ),
                ],
            ),
            item(
                "Financial expenses",
                &["interest expense", "이자비용", "차입금이자"],
                Sign::Natural,
            ),
        ],
    ),
];

/// Tax expense sits outside the Revenue/Expenses groups; it is matched
/// separately and reported between pre-tax and net income.
pub const TAX_EXPENSE: LineItem = LineItem {
    name: "Tax expense",
    keywords: &["income tax", "corporate tax", "법인세비용"],
    sign: Sign::Natural,
};
