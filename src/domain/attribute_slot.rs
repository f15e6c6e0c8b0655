use super::company::{FinancialData, LinkedInData, ProductData};

/// Field of [`super::company::CompanyEnrichment`] an extraction answer is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Revenue,
    FundingTotal,
    LastFundingRound,
    LastFundingDate,
    Employees,
    EmployeeGrowth,
    MainProducts,
    ProductCategories,
    PricingModel,
    LinkedInUrl,
    FollowerCount,
    EmployeeInsights,
}

pub struct AttributeSlot {
    pub description: &'static str,
    pub destination: Destination,
}

/// Provider answers come back in submission order and carry no field names, so the index in
/// this table is the only link between a description and its destination.
pub const ATTRIBUTE_SLOTS: [AttributeSlot; 12] = [
    AttributeSlot {
        description: "Annual revenue or ARR if available",
        destination: Destination::Revenue,
    },
    AttributeSlot {
        description: "Total funding raised",
        destination: Destination::FundingTotal,
    },
    AttributeSlot {
        description: "Most recent funding round (e.g., Series A, Series B)",
        destination: Destination::LastFundingRound,
    },
    AttributeSlot {
        description: "Date of most recent funding round",
        destination: Destination::LastFundingDate,
    },
    AttributeSlot {
        description: "Number of employees",
        destination: Destination::Employees,
    },
    AttributeSlot {
        description: "Year over year employee growth percentage",
        destination: Destination::EmployeeGrowth,
    },
    AttributeSlot {
        description: "Main products or services offered (list up to 5)",
        destination: Destination::MainProducts,
    },
    AttributeSlot {
        description: "Product categories or industries served",
        destination: Destination::ProductCategories,
    },
    AttributeSlot {
        description: "Pricing model (e.g., freemium, subscription, usage-based)",
        destination: Destination::PricingModel,
    },
    AttributeSlot {
        description: "Company LinkedIn URL",
        destination: Destination::LinkedInUrl,
    },
    AttributeSlot {
        description: "LinkedIn follower count",
        destination: Destination::FollowerCount,
    },
    AttributeSlot {
        description: "Recent company news or announcements",
        destination: Destination::EmployeeInsights,
    },
];

/// The grouped sections a slot answer can land in.
#[derive(Debug, Default)]
pub struct SlotSections {
    pub financial: FinancialData,
    pub products: ProductData,
    pub linkedin: LinkedInData,
}

impl Destination {
    pub fn apply(self, sections: &mut SlotSections, value: Option<String>) {
        match self {
            Destination::Revenue => sections.financial.revenue = value,
            Destination::FundingTotal => sections.financial.funding_total = value,
            Destination::LastFundingRound => sections.financial.last_funding_round = value,
            Destination::LastFundingDate => sections.financial.last_funding_date = value,
            Destination::Employees => sections.financial.employees = value,
            Destination::EmployeeGrowth => sections.financial.employee_growth = value,
            Destination::MainProducts => sections.products.main_products = split_list(value),
            Destination::ProductCategories => {
                sections.products.product_categories = split_list(value)
            }
            Destination::PricingModel => sections.products.pricing_model = value,
            Destination::LinkedInUrl => sections.linkedin.company_url = value,
            Destination::FollowerCount => sections.linkedin.follower_count = value,
            Destination::EmployeeInsights => sections.linkedin.employee_insights = value,
        }
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    match value {
        Some(list) => list.split(',').map(|p| p.trim().to_string()).collect(),
        None => vec![],
    }
}

pub fn slot_descriptions() -> Vec<&'static str> {
    ATTRIBUTE_SLOTS.iter().map(|s| s.description).collect()
}
