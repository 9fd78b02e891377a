pub mod kruskal;
