//! Feed fixtures shaped like the real upstream files

/// Head and a few rows of `co2_mm_mlo.txt`
pub const CO2_FEED: &str = "\
# --------------------------------------------------------------------
# USE OF NOAA ESRL DATA
#
# These data are made freely available to the public and the
# scientific community in the belief that their wide dissemination
# will lead to greater understanding and new scientific insights.
#
#            decimal     average   interpolated    trend    #days
#             date                             (season corr)
1958   3    1958.208      315.71      315.71      314.62     -1
1958   4    1958.292      317.45      317.45      315.29     -1
1964   2    1964.125      320.07      320.07      319.61     -1
1964   3    1964.208      -99.99      320.73      319.55     -1
1964   4    1964.292      -99.99      321.77      319.48     -1
2016   6    2016.458      406.81      406.81      404.26     26
2016   7    2016.542      404.39      404.39      404.12     31
";

/// Number of data rows in [`CO2_FEED`]
pub const CO2_ROWS: usize = 7;

/// Head and a few rows of `647_Global_Temperature_Data_File.txt`, CRLF terminated
pub const TEMPS_FEED: &str = "Land-Ocean Temperature Index (C)\r\n\
--------------------------------\r\n\
\r\n\
Year No_Smoothing  Lowess(5)\r\n\
----------------------------\r\n\
1880         -0.20     -0.13\r\n\
1976    -0.11   0.03\r\n\
1977    0.17    0.07\r\n\
2016    0.99    0.87\r\n";

/// Number of data rows in [`TEMPS_FEED`]
pub const TEMPS_ROWS: usize = 4;
