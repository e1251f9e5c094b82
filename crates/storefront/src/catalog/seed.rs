//! Built-in catalog: the persimmon cultivars currently grown in the nursery.

use oleh_garden_core::{Availability, ProductId};

use super::{Cultivation, Product};

const VIRGINIAN_PERSIMMON: &str = "хурма вірджинська";
const HYBRID_PERSIMMON: &str = "хурма гібридна";
const NO_DATA: &str = "—";

const SUNNY_SITE: &str = "Для посадки потрібне сонячне місце, захищене від вітру.";
const BEARS_IN_2_TO_4_YEARS: &str = "Плодоношення починається на 2–4 рік після посадки.";

fn text(value: &str) -> String {
    value.to_owned()
}

#[allow(clippy::too_many_lines)]
pub(super) fn products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            title: text("Соснівська"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/1.jpg"),
            price: Some(text("600 грн/шт (1м) / 800 грн/шт (1,4м+)")),
            stock: Availability::InStock,
            ripening_term: text("ранній, плоди дозрівають у перших числах жовтня"),
            fruits: text(
                "середнього розміру, маса плодів (70-90 г), жовто-помаранчеві з рожевим рум'янцем",
            ),
            taste: text(
                "солодкий, соковитий з незначною терпкістю, яка зникає при повному дозріванні",
            ),
            self_fertility: text("сорт партенокарпічний, запилювачів не потребує"),
            yield_: text("дуже висока"),
            frost_resistance: text("висока (до -29 C°)"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text(SUNNY_SITE),
                care: text(
                    "Дерево невибагливе, але для кращого врожаю рекомендується мульчування ґрунту під кроною та своєчасна обрізка.",
                ),
                bearing_period: text(BEARS_IN_2_TO_4_YEARS),
            },
            tree: None,
            site: None,
            soil: None,
            disease_resistance: None,
        },
        Product {
            id: ProductId::new(2),
            title: text("Дар Софіївки"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/2.jpg"),
            price: Some(text("800 грн/шт")),
            stock: Availability::InStock,
            ripening_term: text("ранній, перша декада жовтня"),
            fruits: text(
                "округлі, злегка плескатої форми, вагою 90-150 г, з оранжево-червоною м'якоттю та солодким смаком",
            ),
            taste: text("солодкий"),
            self_fertility: text(
                "сорт самоплідний, але наявність запилювачів покращує врожайність і розмір плодів",
            ),
            yield_: text(NO_DATA),
            frost_resistance: text("висока, до -28°C, у перші роки бажано зимове укриття"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text(NO_DATA),
                care: text(NO_DATA),
                bearing_period: text(NO_DATA),
            },
            tree: Some(text("середньоросле, широка округла крона, висота 3–3,5 м")),
            site: Some(text("сонячна, захищена від вітру ділянка")),
            soil: Some(text("невибаглива, краще росте на легких, родючих ґрунтах")),
            disease_resistance: None,
        },
        Product {
            id: ProductId::new(3),
            title: text("Чучупака"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/3.jpg"),
            price: Some(text("650 грн/шт (1м) / !850 грн/шт (1,4м+)")),
            stock: Availability::Limited,
            ripening_term: text("дозрівають плоди разом з Росіянкою"),
            fruits: text("малонасінні, м'якоть червоно-коричнева, маса 60–90 г"),
            taste: text("приємний смак плодів"),
            self_fertility: text(NO_DATA),
            yield_: text(NO_DATA),
            frost_resistance: text("висока зимостійкість"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text(NO_DATA),
                care: text(NO_DATA),
                bearing_period: text("ранній вступ у плодоношення"),
            },
            tree: None,
            site: None,
            soil: None,
            disease_resistance: None,
        },
        Product {
            id: ProductId::new(4),
            title: text("Росіянка"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/4.jpg"),
            price: Some(text("600 грн/шт (1м) / 800 грн/шт (1,4м+)")),
            stock: Availability::InStock,
            ripening_term: text(NO_DATA),
            fruits: text("середні, 90–130 г, смачні, соковиті, майже без насіння"),
            taste: text("солодкий, соковитий"),
            self_fertility: text("сорт партенокарпічний, запилювачів не потребує"),
            yield_: text("дуже висока"),
            frost_resistance: text("доросле дерево витримує морози до -27°C"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text(SUNNY_SITE),
                care: text(
                    "Дерево невибагливе, для кращого врожаю — мульчування ґрунту під кроною та своєчасна обрізка.",
                ),
                bearing_period: text(BEARS_IN_2_TO_4_YEARS),
            },
            tree: None,
            site: None,
            soil: None,
            disease_resistance: None,
        },
        Product {
            id: ProductId::new(5),
            title: text("Божий дар"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/5.jpg"),
            price: Some(text("900 грн/шт")),
            stock: Availability::OutOfStock,
            ripening_term: text("середнього строку, кінець жовтня"),
            fruits: text("округлі, яскраво-оранжеві, м'якоть соковита; маса 80–120 г"),
            taste: text("солодка, соковита"),
            self_fertility: text(
                "сорт однодомний, плодоносить без запилення; гарний запилювач для інших",
            ),
            yield_: text("висока, до ~50 кг з дерева"),
            frost_resistance: text("висока, витримує морози до -26°C"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text("сонячне, захищене від вітру місце"),
                care: text(
                    "помірний полив, особливо в перші роки; весною формувальна та санітарна обрізка",
                ),
                bearing_period: text(NO_DATA),
            },
            tree: None,
            site: Some(text("сонячне, захищене від вітру")),
            soil: None,
            disease_resistance: Some(text("висока")),
        },
        Product {
            id: ProductId::new(6),
            title: text("Нікітська бордова"),
            species: text(HYBRID_PERSIMMON),
            image: text("/products/6.jpg"),
            price: None,
            stock: Availability::InStock,
            ripening_term: text("середній, кінець жовтня — початок листопада"),
            fruits: text(
                "середнього розміру, 110–150 г; червоно-помаранчева шкірка з восковим нальотом; бордово-червона солодка м'якоть",
            ),
            taste: text(
                "солодкий, соковитий з незначною терпкістю, яка зникає при повному дозріванні",
            ),
            self_fertility: text("сорт партенокарпічний, запилювачів не потребує"),
            yield_: text("дуже висока"),
            frost_resistance: text("висока (до -26°C)"),
            rootstock: text(VIRGINIAN_PERSIMMON),
            cultivation: Cultivation {
                planting: text(SUNNY_SITE),
                care: text(
                    "Дерево невибагливе, але для кращого врожаю — мульчування ґрунту під кроною та своєчасна обрізка.",
                ),
                bearing_period: text(BEARS_IN_2_TO_4_YEARS),
            },
            tree: None,
            site: None,
            soil: None,
            disease_resistance: None,
        },
    ]
}
