// cities.rs - Static city table backing the filter exercise

use std::sync::OnceLock;

use crate::detector::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub id: ItemId,
    pub name: &'static str,
    pub country: &'static str,
}

const CITY_TABLE: &[(&str, &str)] = &[
    ("Tokyo", "Japan"),
    ("Delhi", "India"),
    ("Shanghai", "China"),
    ("Sao Paulo", "Brazil"),
    ("Mexico City", "Mexico"),
    ("Cairo", "Egypt"),
    ("Mumbai", "India"),
    ("Beijing", "China"),
    ("Dhaka", "Bangladesh"),
    ("Osaka", "Japan"),
    ("New York", "United States"),
    ("Karachi", "Pakistan"),
    ("Buenos Aires", "Argentina"),
    ("Chongqing", "China"),
    ("Istanbul", "Turkey"),
    ("Kolkata", "India"),
    ("Manila", "Philippines"),
    ("Lagos", "Nigeria"),
    ("Rio de Janeiro", "Brazil"),
    ("Tianjin", "China"),
    ("Kinshasa", "DR Congo"),
    ("Guangzhou", "China"),
    ("Los Angeles", "United States"),
    ("Moscow", "Russia"),
    ("Shenzhen", "China"),
    ("Lahore", "Pakistan"),
    ("Bangalore", "India"),
    ("Paris", "France"),
    ("Bogota", "Colombia"),
    ("Jakarta", "Indonesia"),
    ("Chennai", "India"),
    ("Lima", "Peru"),
    ("Bangkok", "Thailand"),
    ("Seoul", "South Korea"),
    ("Nagoya", "Japan"),
    ("Hyderabad", "India"),
    ("London", "United Kingdom"),
    ("Tehran", "Iran"),
    ("Chicago", "United States"),
    ("Chengdu", "China"),
    ("Nanjing", "China"),
    ("Wuhan", "China"),
    ("Ho Chi Minh City", "Vietnam"),
    ("Luanda", "Angola"),
    ("Ahmedabad", "India"),
    ("Kuala Lumpur", "Malaysia"),
    ("Xi'an", "China"),
    ("Hong Kong", "China"),
    ("Dongguan", "China"),
    ("Hangzhou", "China"),
    ("Foshan", "China"),
    ("Shenyang", "China"),
    ("Riyadh", "Saudi Arabia"),
    ("Baghdad", "Iraq"),
    ("Santiago", "Chile"),
    ("Surat", "India"),
    ("Madrid", "Spain"),
    ("Suzhou", "China"),
    ("Pune", "India"),
    ("Harbin", "China"),
    ("Houston", "United States"),
    ("Dallas", "United States"),
    ("Toronto", "Canada"),
    ("Dar es Salaam", "Tanzania"),
    ("Miami", "United States"),
    ("Belo Horizonte", "Brazil"),
    ("Singapore", "Singapore"),
    ("Philadelphia", "United States"),
    ("Atlanta", "United States"),
    ("Fukuoka", "Japan"),
    ("Khartoum", "Sudan"),
    ("Barcelona", "Spain"),
    ("Johannesburg", "South Africa"),
    ("Saint Petersburg", "Russia"),
    ("Qingdao", "China"),
    ("Dalian", "China"),
    ("Washington", "United States"),
    ("Yangon", "Myanmar"),
    ("Alexandria", "Egypt"),
    ("Jinan", "China"),
    ("Guadalajara", "Mexico"),
    ("Ankara", "Turkey"),
    ("Melbourne", "Australia"),
    ("Sydney", "Australia"),
    ("Abidjan", "Ivory Coast"),
    ("Monterrey", "Mexico"),
    ("Nairobi", "Kenya"),
    ("Hanoi", "Vietnam"),
    ("Brasilia", "Brazil"),
    ("Cape Town", "South Africa"),
    ("Berlin", "Germany"),
    ("Rome", "Italy"),
    ("Kabul", "Afghanistan"),
    ("Casablanca", "Morocco"),
    ("Boston", "United States"),
    ("Phoenix", "United States"),
    ("San Francisco", "United States"),
    ("Montreal", "Canada"),
    ("Lisbon", "Portugal"),
    ("Athens", "Greece"),
    ("Vienna", "Austria"),
    ("Warsaw", "Poland"),
    ("Budapest", "Hungary"),
    ("Hamburg", "Germany"),
    ("Bucharest", "Romania"),
    ("Munich", "Germany"),
    ("Prague", "Czechia"),
    ("Milan", "Italy"),
    ("Amsterdam", "Netherlands"),
    ("Stockholm", "Sweden"),
    ("Brussels", "Belgium"),
    ("Copenhagen", "Denmark"),
    ("Dublin", "Ireland"),
    ("Oslo", "Norway"),
    ("Helsinki", "Finland"),
    ("Zurich", "Switzerland"),
    ("Kyiv", "Ukraine"),
    ("Minsk", "Belarus"),
    ("San Antonio", "United States"),
    ("San Diego", "United States"),
    ("San Jose", "United States"),
    ("Santa Cruz", "Bolivia"),
    ("Salt Lake City", "United States"),
    ("Kansas City", "United States"),
    ("Vancouver", "Canada"),
    ("Auckland", "New Zealand"),
    ("Wellington", "New Zealand"),
    ("Reykjavik", "Iceland"),
    ("Kyoto", "Japan"),
    ("Sapporo", "Japan"),
    ("Busan", "South Korea"),
    ("Taipei", "Taiwan"),
    ("Perth", "Australia"),
    ("Adelaide", "Australia"),
    ("Brisbane", "Australia"),
    ("Quito", "Ecuador"),
    ("Caracas", "Venezuela"),
    ("Havana", "Cuba"),
    ("Montevideo", "Uruguay"),
    ("Asuncion", "Paraguay"),
    ("La Paz", "Bolivia"),
    ("Addis Ababa", "Ethiopia"),
    ("Accra", "Ghana"),
    ("Dakar", "Senegal"),
    ("Tunis", "Tunisia"),
    ("Algiers", "Algeria"),
    ("Tashkent", "Uzbekistan"),
    ("Almaty", "Kazakhstan"),
    ("Baku", "Azerbaijan"),
    ("Tbilisi", "Georgia"),
    ("Yerevan", "Armenia"),
];

static CITIES: OnceLock<Vec<City>> = OnceLock::new();

/// Every city in table order; ids are table positions.
pub fn all_cities() -> &'static [City] {
    CITIES.get_or_init(|| {
        CITY_TABLE
            .iter()
            .enumerate()
            .map(|(i, &(name, country))| City { id: ItemId(i as u64), name, country })
            .collect()
    })
}

pub fn city_by_id(id: ItemId) -> Option<&'static City> {
    all_cities().get(id.0 as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_table_positions() {
        for (i, city) in all_cities().iter().enumerate() {
            assert_eq!(city.id, ItemId(i as u64));
        }
        assert_eq!(city_by_id(ItemId(0)).map(|c| c.name), Some("Tokyo"));
        assert!(city_by_id(ItemId(all_cities().len() as u64)).is_none());
    }

    #[test]
    fn table_has_more_rows_than_the_visible_cap() {
        assert!(all_cities().len() > crate::config::MAX_VISIBLE_ITEMS);
    }
}
