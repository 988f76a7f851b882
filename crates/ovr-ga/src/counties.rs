//! The MVP site's fixed county identifiers.

/// County name -> three-digit form id, as the lookup form posts them.
pub const COUNTIES: &[(&str, &str)] = &[
    ("APPLING", "001"),
    ("ATKINSON", "002"),
    ("BACON", "003"),
    ("BAKER", "004"),
    ("BALDWIN", "005"),
    ("BANKS", "006"),
    ("BARROW", "007"),
    ("BARTOW", "008"),
    ("BEN HILL", "009"),
    ("BERRIEN", "010"),
    ("BIBB", "011"),
    ("BLECKLEY", "012"),
    ("BRANTLEY", "013"),
    ("BROOKS", "014"),
    ("BRYAN", "015"),
    ("BULLOCH", "016"),
    ("BURKE", "017"),
    ("BUTTS", "018"),
    ("CALHOUN", "019"),
    ("CAMDEN", "020"),
    ("CANDLER", "021"),
    ("CARROLL", "022"),
    ("CATOOSA", "023"),
    ("CHARLTON", "024"),
    ("CHATHAM", "025"),
    ("CHATTAHOOCHEE", "026"),
    ("CHATTOOGA", "027"),
    ("CHEROKEE", "028"),
    ("CLARKE", "029"),
    ("CLAY", "030"),
    ("CLAYTON", "031"),
    ("CLINCH", "032"),
    ("COBB", "033"),
    ("COFFEE", "034"),
    ("COLQUITT", "035"),
    ("COLUMBIA", "036"),
    ("COOK", "037"),
    ("COWETA", "038"),
    ("CRAWFORD", "039"),
    ("CRISP", "040"),
    ("DADE", "041"),
    ("DAWSON", "042"),
    ("DECATUR", "043"),
    ("DEKALB", "044"),
    ("DODGE", "045"),
    ("DOOLY", "046"),
    ("DOUGHERTY", "047"),
    ("DOUGLAS", "048"),
    ("EARLY", "049"),
    ("ECHOLS", "050"),
    ("EFFINGHAM", "051"),
    ("ELBERT", "052"),
    ("EMANUEL", "053"),
    ("EVANS", "054"),
    ("FANNIN", "055"),
    ("FAYETTE", "056"),
    ("FLOYD", "057"),
    ("FORSYTH", "058"),
    ("FRANKLIN", "059"),
    ("FULTON", "060"),
    ("GILMER", "061"),
    ("GLASCOCK", "062"),
    ("GLYNN", "063"),
    ("GORDON", "064"),
    ("GRADY", "065"),
    ("GREENE", "066"),
    ("GWINNETT", "067"),
    ("HABERSHAM", "068"),
    ("HALL", "069"),
    ("HANCOCK", "070"),
    ("HARALSON", "071"),
    ("HARRIS", "072"),
    ("HART", "073"),
    ("HEARD", "074"),
    ("HENRY", "075"),
    ("HOUSTON", "076"),
    ("IRWIN", "077"),
    ("JACKSON", "078"),
    ("JASPER", "079"),
    ("JEFF DAVIS", "080"),
    ("JEFFERSON", "081"),
    ("JENKINS", "082"),
    ("JOHNSON", "083"),
    ("JONES", "084"),
    ("LAMAR", "085"),
    ("LANIER", "086"),
    ("LAURENS", "087"),
    ("LEE", "088"),
    ("LIBERTY", "089"),
    ("LINCOLN", "090"),
    ("LONG", "091"),
    ("LOWNDES", "092"),
    ("LUMPKIN", "093"),
    ("MACON", "094"),
    ("MADISON", "095"),
    ("MARION", "096"),
    ("MCDUFFIE", "097"),
    ("MCINTOSH", "098"),
    ("MERIWETHER", "099"),
    ("MILLER", "100"),
    ("MITCHELL", "101"),
    ("MONROE", "102"),
    ("MONTGOMERY", "103"),
    ("MORGAN", "104"),
    ("MURRAY", "105"),
    ("MUSCOGEE", "106"),
    ("NEWTON", "107"),
    ("OCONEE", "108"),
    ("OGLETHORPE", "109"),
    ("PAULDING", "110"),
    ("PEACH", "111"),
    ("PICKENS", "112"),
    ("PIERCE", "113"),
    ("PIKE", "114"),
    ("POLK", "115"),
    ("PULASKI", "116"),
    ("PUTNAM", "117"),
    ("QUITMAN", "118"),
    ("RABUN", "119"),
    ("RANDOLPH", "120"),
    ("RICHMOND", "121"),
    ("ROCKDALE", "122"),
    ("SCHLEY", "123"),
    ("SCREVEN", "124"),
    ("SEMINOLE", "125"),
    ("SPALDING", "126"),
    ("STEPHENS", "127"),
    ("STEWART", "128"),
    ("SUMTER", "129"),
    ("TALBOT", "130"),
    ("TALIAFERRO", "131"),
    ("TATTNALL", "132"),
    ("TAYLOR", "133"),
    ("TELFAIR", "134"),
    ("TERRELL", "135"),
    ("THOMAS", "136"),
    ("TIFT", "137"),
    ("TOOMBS", "138"),
    ("TOWNS", "139"),
    ("TREUTLEN", "140"),
    ("TROUP", "141"),
    ("TURNER", "142"),
    ("TWIGGS", "143"),
    ("UNION", "144"),
    ("UPSON", "145"),
    ("WALKER", "146"),
    ("WALTON", "147"),
    ("WARE", "148"),
    ("WARREN", "149"),
    ("WASHINGTON", "150"),
    ("WAYNE", "151"),
    ("WEBSTER", "152"),
    ("WHEELER", "153"),
    ("WHITE", "154"),
    ("WHITFIELD", "155"),
    ("WILCOX", "156"),
    ("WILKES", "157"),
    ("WILKINSON", "158"),
    ("WORTH", "159"),
];

/// Resolve a county name, case-insensitively, to its form id.
pub fn county_id(name: &str) -> Option<&'static str> {
    COUNTIES
        .iter()
        .find(|(county, _)| county.eq_ignore_ascii_case(name.trim()))
        .map(|(_, id)| *id)
}
