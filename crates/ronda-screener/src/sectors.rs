//! The screener's sector to industry classification.

use ronda_traits::Sector;

const BASIC_MATERIALS: &[&str] = &[
    "Agricultural Inputs",
    "Aluminum",
    "Chemicals",
    "Copper",
    "Gold",
    "Lumber & Wood Production",
    "Other Precious Metals & Mining",
    "Other Industrial Metals & Mining",
    "Paper & Paper Products",
    "Specialty Chemicals",
    "Steel",
];

const COMMUNICATION_SERVICES: &[&str] = &[
    "Advertising Agencies",
    "Broadcasting",
    "Entertainment",
    "Internet Content & Information",
    "Publishing",
    "Telecom Services",
];

const CONSUMER_CYCLICAL: &[&str] = &[
    "Apparel Manufacturing",
    "Apparel Retail",
    "Auto & Truck Dealerships",
    "Auto Manufacturers",
    "Auto Parts",
    "Footwear & Accessories",
    "Gambling",
    "Home Improvement Retail",
    "Hotels, Motels & Resorts",
    "Internet Retail",
    "Luxury Goods",
    "Packaging & Containers",
    "Personal Services",
    "Residential Construction",
    "Resorts & Casinos",
    "Restaurants",
    "Specialty Retail",
    "Textile Manufacturing",
    "Travel Services",
];

const CONSUMER_DEFENSIVE: &[&str] = &[
    "Beverages - Non-Alcoholic",
    "Beverages - Wineries & Distilleries",
    "Confectioners",
    "Discount Stores",
    "Education & Training Services",
    "Farm Products",
    "Food Distribution",
    "Grocery Stores",
    "Household & Personal Products",
    "Packaged Foods",
    "Tobacco",
];

const ENERGY: &[&str] = &[
    "Oil & Gas Drilling",
    "Oil & Gas E&P",
    "Oil & Gas Equipment & Services",
    "Oil & Gas Integrated",
    "Oil & Gas Midstream",
    "Oil & Gas Refining & Marketing",
    "Solar",
    "Thermal Energy",
    "Uranium",
];

const FINANCIAL: &[&str] = &[
    "Asset Management",
    "Banks - Diversified",
    "Banks - Regional",
    "Capital Markets",
    "Credit Services",
    "Financial Data & Stock Exchanges",
    "Insurance - Diversified",
    "Insurance - Life",
    "Insurance - Property & Casualty",
    "Insurance - Reinsurance",
    "Insurance - Specialty",
    "Insurance Brokers",
    "Mortgage Finance",
    "Shell Companies",
];

const HEALTHCARE: &[&str] = &[
    "Biotechnology",
    "Diagnostics & Research",
    "Drug Manufacturers - General",
    "Drug Manufacturers - Specialty & Generic",
    "Health Information Services",
    "Healthcare Plans",
    "Medical Care Facilities",
    "Medical Devices",
    "Medical Instruments & Supplies",
    "Pharmaceutical Retailers",
];

const INDUSTRIALS: &[&str] = &[
    "Aerospace & Defense",
    "Airlines",
    "Building Products & Equipment",
    "Business Equipment & Services",
    "Conglomerates",
    "Consulting Services",
    "Electrical Equipment & Parts",
    "Engineering & Construction",
    "Farm & Heavy Construction Machinery",
    "Industrial Distribution",
    "Integrated Freight & Logistics",
    "Marine Shipping",
    "Metal Fabrication",
    "Pollution & Treatment Controls",
    "Railroads",
    "Rental & Leasing Services",
    "Security & Protection Services",
    "Specialty Business Services",
    "Staffing & Employment Services",
    "Tools & Accessories",
    "Trucking",
];

const REAL_ESTATE: &[&str] = &[
    "REIT - Diversified",
    "REIT - Healthcare Facilities",
    "REIT - Hotel & Motel",
    "REIT - Industrial",
    "REIT - Mortgage",
    "REIT - Office",
    "REIT - Residential",
    "REIT - Retail",
    "REIT - Specialty",
    "Real Estate - Development",
    "Real Estate Services",
];

const TECHNOLOGY: &[&str] = &[
    "Communication Equipment",
    "Computer Hardware",
    "Consumer Electronics",
    "Electronic Components",
    "Electronics & Computer Distribution",
    "Information Technology Services",
    "Scientific & Technical Instruments",
    "Semiconductor Equipment & Materials",
    "Semiconductors",
    "Software - Application",
    "Software - Infrastructure",
    "Solar",
];

const UTILITIES: &[&str] = &[
    "Utilities - Diversified",
    "Utilities - Independent Power Producers",
    "Utilities - Regulated Electric",
    "Utilities - Regulated Gas",
    "Utilities - Regulated Water",
];

/// Industries the screener files under `sector`.
pub const fn sector_industries(sector: Sector) -> &'static [&'static str] {
    match sector {
        Sector::BasicMaterials => BASIC_MATERIALS,
        Sector::CommunicationServices => COMMUNICATION_SERVICES,
        Sector::ConsumerCyclical => CONSUMER_CYCLICAL,
        Sector::ConsumerDefensive => CONSUMER_DEFENSIVE,
        Sector::Energy => ENERGY,
        Sector::Financial => FINANCIAL,
        Sector::Healthcare => HEALTHCARE,
        Sector::Industrials => INDUSTRIALS,
        Sector::RealEstate => REAL_ESTATE,
        Sector::Technology => TECHNOLOGY,
        Sector::Utilities => UTILITIES,
    }
}

/// Industries of all `sectors`, first occurrence order, without repeats.
///
/// `Solar` is filed under both Energy and Technology and appears once.
pub fn industries_for(sectors: &[Sector]) -> Vec<&'static str> {
    let mut industries: Vec<&'static str> = Vec::new();
    for &sector in sectors {
        for &industry in sector_industries(sector) {
            if !industries.contains(&industry) {
                industries.push(industry);
            }
        }
    }
    industries
}

/// Sectors that list `industry`.
pub fn sectors_of(industry: &str) -> Vec<Sector> {
    Sector::ALL
        .into_iter()
        .filter(|&sector| sector_industries(sector).contains(&industry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sector_has_industries() {
        for sector in Sector::ALL {
            assert!(!sector_industries(sector).is_empty(), "{sector}");
        }
        assert_eq!(sector_industries(Sector::Utilities).len(), 5);
        assert!(sector_industries(Sector::Financial).contains(&"Banks - Regional"));
    }

    #[test]
    fn test_industries_for_dedups() {
        let both = industries_for(&[Sector::Energy, Sector::Technology]);
        let solar = both.iter().filter(|&&i| i == "Solar").count();
        assert_eq!(solar, 1);
        assert_eq!(
            both.len(),
            sector_industries(Sector::Energy).len() + sector_industries(Sector::Technology).len() - 1
        );
        assert!(industries_for(&[]).is_empty());
    }

    #[test]
    fn test_sectors_of() {
        assert_eq!(sectors_of("Solar"), vec![Sector::Energy, Sector::Technology]);
        assert_eq!(sectors_of("Gold"), vec![Sector::BasicMaterials]);
        assert!(sectors_of("Crypto Mining").is_empty());
    }
}
